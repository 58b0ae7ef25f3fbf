// Copyright 2025 zkfloat developers

//! Fixed right shifts and bounded variable left shifts.

use zkfloat_core::WireId;
use zkfloat_field::{pow2, Field};
use zkfloat_utils::{
	checked_arithmetics::{bit_length, log2_ceil_usize},
	ensure,
};

use crate::{
	bits::Num2Bits,
	builder::{
		not,
		types::{Lc, Witness, F},
		ConstraintSystemBuilder,
	},
	comparison::LessThan,
	Error,
};

/// `out = input >> shift` for an input of at most `n_bits` bits and a constant `shift`.
///
/// Decomposes the input, drops the low `shift` bits and recomposes the rest. No witness exists
/// when the input does not fit in `n_bits` bits.
#[derive(Debug, Clone)]
pub struct RightShift {
	bits: Num2Bits,
	pub out: WireId,
}

impl RightShift {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		input: impl Into<Lc>,
		n_bits: usize,
		shift: usize,
	) -> Result<Self, anyhow::Error> {
		ensure!(
			shift < n_bits,
			Error::InvalidShift {
				shift,
				bits: n_bits
			}
		);

		builder.push_namespace(name);
		let bits = Num2Bits::new(builder, "bits", input, n_bits)?;
		let high = bits.bits[shift..]
			.iter()
			.enumerate()
			.fold(Lc::zero(), |lc, (i, &bit)| lc.add_term(bit, pow2(i)));
		let out = builder.add_linear_combination("out", high);
		builder.pop_namespace();

		Ok(Self { bits, out })
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		self.bits.populate(witness)?;
		witness.fill_linear_combination(self.out)?;
		Ok(())
	}
}

/// `out = input * 2^shift` for a shift amount carried by a wire.
///
/// The shift amount is checked to be below `shift_bound` unless `skip_checks = 1`. Independently
/// of that check, the shift amount is decomposed into `ceil(log2(shift_bound))` bits and
/// `2^shift` is built as the product chain
/// `pow_{i+1} = pow_i * (1 + bit_i * (2^(2^i) - 1))`, so the output is bound to the input by
/// `out = input * pow`. The caller must keep `input * 2^shift` below the field modulus for the
/// product to agree with the integer shift.
#[derive(Debug, Clone)]
pub struct LeftShift {
	input: Lc,
	in_range: LessThan,
	shift_bits: Num2Bits,
	powers: Vec<WireId>,
	pub out: WireId,
}

impl LeftShift {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		input: impl Into<Lc>,
		shift: impl Into<Lc>,
		skip_checks: impl Into<Lc>,
		shift_bound: usize,
	) -> Result<Self, anyhow::Error> {
		ensure!(shift_bound > 0, Error::EmptyRange { gadget: "LeftShift" });
		let (input, shift, skip_checks): (Lc, Lc, Lc) =
			(input.into(), shift.into(), skip_checks.into());

		builder.push_namespace(name);

		let bound = Lc::constant(F::from(shift_bound as u64));
		let in_range = LessThan::new(
			builder,
			"in_range",
			bit_length(shift_bound as u64),
			shift.clone(),
			bound,
		)?;
		builder.assert_product(
			"in_range_unless_skipped",
			Lc::from(in_range.out) - Lc::one(),
			not(skip_checks),
			Lc::zero(),
		);

		let n_shift_bits = log2_ceil_usize(shift_bound);
		let shift_bits = Num2Bits::new(builder, "shift_bits", shift, n_shift_bits)?;

		let mut powers = Vec::with_capacity(n_shift_bits);
		let mut pow = Lc::one();
		for (i, &bit) in shift_bits.bits.iter().enumerate() {
			let next = builder.add_committed(format!("pow_{}", i + 1));
			let factor = Lc::one().add_term(bit, pow2::<F>(1 << i) - F::ONE);
			builder.assert_product(format!("pow_step_{i}"), pow, factor, next);
			powers.push(next);
			pow = next.into();
		}

		let out = builder.add_committed("out");
		builder.assert_product("shifted", input.clone(), pow, out);
		builder.pop_namespace();

		Ok(Self {
			input,
			in_range,
			shift_bits,
			powers,
			out,
		})
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		self.in_range.populate(witness)?;
		self.shift_bits.populate(witness)?;

		let mut pow = F::ONE;
		for (i, (&bit, &next)) in self.shift_bits.bits.iter().zip(&self.powers).enumerate() {
			if witness.get(bit)? == F::ONE {
				pow *= pow2::<F>(1 << i);
			}
			witness.set(next, pow)?;
		}

		let input = witness.eval(&self.input)?;
		witness.set(self.out, input * pow)?;
		Ok(())
	}
}
