// Copyright 2025 zkfloat developers

//! Floating-point numbers as `(exponent, mantissa)` pairs of field elements.
//!
//! A float with `k` exponent bits and precision `p` is well formed when either both parts are
//! zero, or the exponent is a non-zero `k`-bit integer and the mantissa lies in
//! `[2^p, 2^(p+1))`. The value represented is `mantissa * 2^(exponent - p)`.

mod add;
mod normalize;
pub mod reference;
mod round;
mod well_formed;

use std::fmt;

pub use add::FloatAdd;
use getset::CopyGetters;
pub use normalize::Normalize;
use rand::Rng;
pub use round::RoundAndCheck;
pub use well_formed::CheckWellFormedness;
use zkfloat_core::{Visibility, WireId};
use zkfloat_field::{from_u128, max_comparison_bits, max_decomposition_bits, to_u128, to_u64};
use zkfloat_utils::ensure;

use crate::{
	builder::{
		types::{Witness, F},
		ConstraintSystemBuilder,
	},
	Error,
};

/// Exponent width `k` and precision `p` of a float format.
///
/// Every float gadget receives the format by value when it is declared, and the format cannot
/// change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct FloatFormat {
	exponent_bits: usize,
	precision: usize,
}

impl FloatFormat {
	/// Validates the format against the field margins.
	///
	/// The adder compares `mantissa + exponent * 2^(p+1)`, which needs `k + p + 1` comparison
	/// bits, and rounds a `2p + 2`-bit mantissa with one carry bit, which needs `2p + 3`
	/// decomposition bits.
	pub fn new(exponent_bits: usize, precision: usize) -> Result<Self, Error> {
		let invalid = |reason| Error::InvalidFormat {
			exponent_bits,
			precision,
			reason,
		};
		ensure!(exponent_bits >= 1, invalid("at least one exponent bit is required"));
		ensure!(precision >= 1, invalid("the precision must be at least one"));
		ensure!(exponent_bits <= 64, invalid("exponents are limited to 64 bits"));
		ensure!(
			exponent_bits + precision + 1 <= max_comparison_bits::<F>(),
			invalid("operand ordering exceeds the comparison margin")
		);
		ensure!(
			2 * precision + 3 <= max_decomposition_bits::<F>(),
			invalid("rounding exceeds the decomposition margin")
		);
		Ok(Self {
			exponent_bits,
			precision,
		})
	}

	/// The precision `P = 2p + 1` of an unrounded sum.
	pub const fn wide_precision(&self) -> usize {
		2 * self.precision + 1
	}

	pub const fn max_exponent(&self) -> u64 {
		if self.exponent_bits == 64 {
			u64::MAX
		} else {
			(1 << self.exponent_bits) - 1
		}
	}

	pub const fn min_mantissa(&self) -> u128 {
		1 << self.precision
	}

	pub const fn max_mantissa(&self) -> u128 {
		(1 << (self.precision + 1)) - 1
	}

	pub fn is_well_formed(&self, value: FloatValue) -> bool {
		if value.exponent == 0 {
			value.mantissa == 0
		} else {
			value.exponent <= self.max_exponent()
				&& (self.min_mantissa()..=self.max_mantissa()).contains(&value.mantissa)
		}
	}

	/// Approximates the represented value.
	pub fn to_f64(&self, value: FloatValue) -> f64 {
		let scale = value.exponent as i128 - self.precision as i128;
		let scale = scale.clamp(i32::MIN as i128, i32::MAX as i128) as i32;
		value.mantissa as f64 * 2f64.powi(scale)
	}

	/// Samples a non-zero well-formed float with an exponent in `exponents`.
	pub fn random_value_in(
		&self,
		rng: &mut impl Rng,
		exponents: std::ops::RangeInclusive<u64>,
	) -> FloatValue {
		let lo = (*exponents.start()).max(1);
		let hi = (*exponents.end()).min(self.max_exponent()).max(lo);
		FloatValue {
			exponent: rng.gen_range(lo..=hi),
			mantissa: rng.gen_range(self.min_mantissa()..=self.max_mantissa()),
		}
	}
}

/// Host representation of a float, as plain integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FloatValue {
	pub exponent: u64,
	pub mantissa: u128,
}

impl FloatValue {
	pub const ZERO: Self = Self {
		exponent: 0,
		mantissa: 0,
	};

	pub const fn new(exponent: u64, mantissa: u128) -> Self {
		Self { exponent, mantissa }
	}
}

impl fmt::Display for FloatValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(e={}, m={})", self.exponent, self.mantissa)
	}
}

/// The two wires carrying a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatWires {
	pub exponent: WireId,
	pub mantissa: WireId,
}

impl FloatWires {
	/// Declares the input wires `e_{suffix}` and `m_{suffix}`.
	pub fn add_input(
		builder: &mut ConstraintSystemBuilder,
		suffix: impl fmt::Display,
		visibility: Visibility,
	) -> Self {
		Self {
			exponent: builder.add_input(format!("e_{suffix}"), visibility),
			mantissa: builder.add_input(format!("m_{suffix}"), visibility),
		}
	}

	pub fn assign(&self, witness: &mut Witness, value: FloatValue) -> Result<(), anyhow::Error> {
		witness.set(self.exponent, F::from(value.exponent))?;
		witness.set(self.mantissa, from_u128(value.mantissa))?;
		Ok(())
	}

	pub fn read(&self, witness: &Witness) -> Result<FloatValue, anyhow::Error> {
		Ok(FloatValue {
			exponent: to_u64(witness.get(self.exponent)?)?,
			mantissa: to_u128(witness.get(self.mantissa)?)?,
		})
	}
}
