// Copyright 2025 zkfloat developers

use itertools::Itertools;
use zkfloat_core::WireId;
use zkfloat_field::Field;
use zkfloat_utils::ensure;

use crate::{
	bits::Num2Bits,
	builder::{
		not,
		types::{Lc, Witness, F},
		ConstraintSystemBuilder,
	},
	comparison::IsZero,
	Error,
};

/// Locates the most significant non-zero bit of an `n_bits`-bit input as a one-hot vector.
///
/// `mask[i]` is one iff every bit above position `i` is zero, so `one_hot[i] = mask[i] * bit[i]`
/// is one exactly at the highest set bit. The input is asserted non-zero unless
/// `skip_checks = 1`; with a zero input and the check skipped the one-hot vector is all zeros.
#[derive(Debug, Clone)]
pub struct Msnzb {
	is_zero: IsZero,
	bits: Num2Bits,
	/// `mask[i]` for `i < n_bits - 1`; the top mask entry is the constant one.
	mask: Vec<WireId>,
	pub one_hot: Vec<WireId>,
}

impl Msnzb {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		input: impl Into<Lc>,
		skip_checks: impl Into<Lc>,
		n_bits: usize,
	) -> Result<Self, anyhow::Error> {
		ensure!(n_bits > 0, Error::EmptyRange { gadget: "Msnzb" });
		let input: Lc = input.into();

		builder.push_namespace(name);

		let is_zero = IsZero::new(builder, "is_zero", input.clone());
		builder.assert_product(
			"non_zero_unless_skipped",
			is_zero.out,
			not(skip_checks),
			Lc::zero(),
		);

		let bits = Num2Bits::new(builder, "bits", input, n_bits)?;

		let mut mask_lc = vec![Lc::one(); n_bits];
		let mut mask = vec![WireId::invalid(); n_bits - 1];
		for i in (0..n_bits - 1).rev() {
			mask[i] = builder.add_committed(format!("mask_{i}"));
			builder.assert_product(
				format!("mask_step_{i}"),
				mask_lc[i + 1].clone(),
				not(bits.bits[i + 1]),
				mask[i],
			);
			mask_lc[i] = mask[i].into();
		}

		let one_hot = (0..n_bits)
			.map(|i| {
				let out = builder.add_committed(format!("one_hot_{i}"));
				builder.assert_product(
					format!("one_hot_{i}"),
					mask_lc[i].clone(),
					bits.bits[i],
					out,
				);
				out
			})
			.collect();

		builder.pop_namespace();

		Ok(Self {
			is_zero,
			bits,
			mask,
			one_hot,
		})
	}

	pub fn n_bits(&self) -> usize {
		self.one_hot.len()
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		self.is_zero.populate(witness)?;
		self.bits.populate(witness)?;

		let bits = self
			.bits
			.bits
			.iter()
			.map(|&bit| witness.get(bit))
			.collect::<Result<Vec<_>, _>>()?;

		let n_bits = self.n_bits();
		let mut mask = vec![F::ONE; n_bits];
		for i in (0..n_bits - 1).rev() {
			mask[i] = mask[i + 1] * (F::ONE - bits[i + 1]);
			witness.set(self.mask[i], mask[i])?;
		}

		for ((&out, mask), bit) in self.one_hot.iter().zip_eq(mask).zip_eq(bits) {
			witness.set(out, mask * bit)?;
		}
		Ok(())
	}
}
