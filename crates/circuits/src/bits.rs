// Copyright 2025 zkfloat developers

//! Bit decomposition and range checks.

use itertools::Itertools;
use zkfloat_core::WireId;
use zkfloat_field::{low_bits, max_decomposition_bits, pow2, AdditiveGroup, Field};
use zkfloat_utils::ensure;

use crate::{
	builder::{
		types::{Lc, Witness, F},
		ConstraintSystemBuilder,
	},
	comparison::IsEqual,
	Error,
};

/// The low `n_bits` bits of `x`, least significant first.
///
/// This is the hint behind [`Num2Bits`] and [`CheckBitLength`]. Bits beyond the canonical
/// representative of `x` are simply dropped.
pub fn decompose_le(x: F, n_bits: usize) -> Vec<F> {
	low_bits(x, n_bits)
		.into_iter()
		.map(|bit| if bit { F::ONE } else { F::ZERO })
		.collect()
}

fn weighted_sum(bits: &[WireId]) -> Lc {
	bits.iter()
		.enumerate()
		.fold(Lc::zero(), |lc, (i, &bit)| lc.add_term(bit, pow2(i)))
}

fn check_width(n_bits: usize) -> Result<(), Error> {
	let max = max_decomposition_bits::<F>();
	ensure!(n_bits <= max, Error::BitWidthTooLarge { bits: n_bits, max });
	Ok(())
}

/// Decomposes the input into `n_bits` boolean wires, least significant first.
///
/// Asserts each bit is boolean and that the bits recompose to the input. No witness exists when
/// the input is `2^n_bits` or larger.
#[derive(Debug, Clone)]
pub struct Num2Bits {
	input: Lc,
	pub bits: Vec<WireId>,
}

impl Num2Bits {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		input: impl Into<Lc>,
		n_bits: usize,
	) -> Result<Self, anyhow::Error> {
		check_width(n_bits)?;
		let input: Lc = input.into();

		builder.push_namespace(name);
		let bits = builder.add_committed_multiple("bit", n_bits);
		for (i, &bit) in bits.iter().enumerate() {
			builder.assert_bool(format!("bool_{i}"), bit);
		}
		builder.assert_equal("recompose", weighted_sum(&bits), input.clone());
		builder.pop_namespace();

		Ok(Self { input, bits })
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		let input = witness.eval(&self.input)?;
		for (&bit, value) in self.bits.iter().zip_eq(decompose_le(input, self.bits.len())) {
			witness.set(bit, value)?;
		}
		Ok(())
	}
}

/// Recomposes bits, least significant first, into one virtual wire.
///
/// The bits are assumed boolean; nothing is asserted.
#[derive(Debug, Clone)]
pub struct Bits2Num {
	pub out: WireId,
}

impl Bits2Num {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		bits: &[WireId],
	) -> Self {
		let out = builder.add_linear_combination(name, weighted_sum(bits));
		Self { out }
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		witness.fill_linear_combination(self.out)?;
		Ok(())
	}
}

/// Non-asserting range check: `out = 1` iff the input fits in `n_bits` bits.
///
/// Only `out = 1` is sound. A prover can always make `out = 0` by proposing bits that do not sum
/// to the input, so callers may only rely on this gadget through a selection whose result is
/// asserted to be one.
#[derive(Debug, Clone)]
pub struct CheckBitLength {
	input: Lc,
	bits: Vec<WireId>,
	sum: WireId,
	is_equal: IsEqual,
	pub out: WireId,
}

impl CheckBitLength {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		input: impl Into<Lc>,
		n_bits: usize,
	) -> Result<Self, anyhow::Error> {
		check_width(n_bits)?;
		let input: Lc = input.into();

		builder.push_namespace(name);
		let bits = builder.add_committed_multiple("bit", n_bits);
		for (i, &bit) in bits.iter().enumerate() {
			builder.assert_bool(format!("bool_{i}"), bit);
		}
		let sum = builder.add_linear_combination("sum", weighted_sum(&bits));
		let is_equal = IsEqual::new(builder, "sum_eq_input", sum, input.clone());
		builder.pop_namespace();

		Ok(Self {
			input,
			bits,
			sum,
			out: is_equal.out,
			is_equal,
		})
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		let input = witness.eval(&self.input)?;
		for (&bit, value) in self.bits.iter().zip_eq(decompose_le(input, self.bits.len())) {
			witness.set(bit, value)?;
		}
		witness.fill_linear_combination(self.sum)?;
		self.is_equal.populate(witness)
	}
}
