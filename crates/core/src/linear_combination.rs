// Copyright 2025 zkfloat developers

use std::{
	fmt,
	ops::{Add, Mul, Neg, Sub},
};

use zkfloat_field::Field;

use crate::WireId;

/// An affine combination of wires, `offset + Σ coeff · wire`.
///
/// Terms are kept in insertion order and repeated wires are not merged; evaluation sums all of
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearCombination<F: Field> {
	offset: F,
	terms: Vec<(WireId, F)>,
}

impl<F: Field> LinearCombination<F> {
	pub fn zero() -> Self {
		Self::constant(F::ZERO)
	}

	pub fn one() -> Self {
		Self::constant(F::ONE)
	}

	pub fn constant(offset: F) -> Self {
		Self {
			offset,
			terms: Vec::new(),
		}
	}

	pub fn offset(&self) -> F {
		self.offset
	}

	pub fn terms(&self) -> &[(WireId, F)] {
		&self.terms
	}

	/// The wires referenced by this combination, in term order.
	pub fn wires(&self) -> impl Iterator<Item = WireId> + '_ {
		self.terms.iter().map(|&(wire, _)| wire)
	}

	pub fn add_term(mut self, wire: WireId, coeff: F) -> Self {
		self.terms.push((wire, coeff));
		self
	}

	/// Evaluates the combination, reading wire values through `value`.
	pub fn evaluate<E>(&self, mut value: impl FnMut(WireId) -> Result<F, E>) -> Result<F, E> {
		self.terms
			.iter()
			.try_fold(self.offset, |acc, &(wire, coeff)| Ok(acc + coeff * value(wire)?))
	}
}

impl<F: Field> Default for LinearCombination<F> {
	fn default() -> Self {
		Self::zero()
	}
}

impl<F: Field> From<WireId> for LinearCombination<F> {
	fn from(wire: WireId) -> Self {
		Self {
			offset: F::ZERO,
			terms: vec![(wire, F::ONE)],
		}
	}
}

impl<F: Field> From<&WireId> for LinearCombination<F> {
	fn from(wire: &WireId) -> Self {
		Self::from(*wire)
	}
}

impl<F: Field> Add<Self> for LinearCombination<F> {
	type Output = Self;

	fn add(mut self, rhs: Self) -> Self {
		self.offset += rhs.offset;
		self.terms.extend(rhs.terms);
		self
	}
}

impl<F: Field> Add<WireId> for LinearCombination<F> {
	type Output = Self;

	fn add(self, rhs: WireId) -> Self {
		self.add_term(rhs, F::ONE)
	}
}

impl<F: Field> Sub<Self> for LinearCombination<F> {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		self + (-rhs)
	}
}

impl<F: Field> Sub<WireId> for LinearCombination<F> {
	type Output = Self;

	fn sub(self, rhs: WireId) -> Self {
		self.add_term(rhs, -F::ONE)
	}
}

impl<F: Field> Neg for LinearCombination<F> {
	type Output = Self;

	fn neg(self) -> Self {
		self * -F::ONE
	}
}

impl<F: Field> Mul<F> for LinearCombination<F> {
	type Output = Self;

	fn mul(mut self, rhs: F) -> Self {
		self.offset *= rhs;
		for (_, coeff) in self.terms.iter_mut() {
			*coeff *= rhs;
		}
		self
	}
}

/// This exists only to implement Display for LinearCombination with named wires.
pub struct LinearCombinationNamed<'a, F: Field>(pub &'a LinearCombination<F>, pub &'a [String]);

impl<F: Field> fmt::Display for LinearCombinationNamed<'_, F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Self(lc, names) = self;
		let mut first = true;
		for &(wire, coeff) in lc.terms() {
			let name = names
				.get(wire.index())
				.map(String::as_str)
				.unwrap_or("<invalid>");
			let sep = if first { "" } else { " + " };
			if coeff == F::ONE {
				write!(f, "{sep}{name}")?;
			} else if coeff == -F::ONE {
				let sep = if first { "-" } else { " - " };
				write!(f, "{sep}{name}")?;
			} else {
				write!(f, "{sep}{coeff}*{name}")?;
			}
			first = false;
		}
		if first {
			write!(f, "{}", lc.offset())
		} else if lc.offset() != F::ZERO {
			write!(f, " + {}", lc.offset())
		} else {
			Ok(())
		}
	}
}
