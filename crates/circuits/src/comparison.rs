// Copyright 2025 zkfloat developers

//! Zero, equality and ordering tests.

use zkfloat_core::WireId;
use zkfloat_field::{max_comparison_bits, pow2, AdditiveGroup, Field};
use zkfloat_utils::ensure;

use crate::{
	bits::Num2Bits,
	builder::{
		not,
		types::{Lc, Witness, F},
		ConstraintSystemBuilder,
	},
	Error,
};

/// Hint for [`IsZero`]: `1 / x`, or zero when `x = 0`.
pub fn inverse_or_zero(x: F) -> F {
	x.inverse().unwrap_or(F::ZERO)
}

/// `out = 1` iff the input is zero.
///
/// With `inv` the proposed inverse, the constraints are `x * inv = 1 - out` and `x * out = 0`.
/// For `x != 0` the second forces `out = 0`, and then the first pins `inv`. For `x = 0` the first
/// forces `out = 1` whatever `inv` is.
#[derive(Debug, Clone)]
pub struct IsZero {
	input: Lc,
	inv: WireId,
	pub out: WireId,
}

impl IsZero {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		input: impl Into<Lc>,
	) -> Self {
		let input: Lc = input.into();
		builder.push_namespace(name);
		let inv = builder.add_committed("inv");
		let out = builder.add_committed("out");
		builder.assert_product("inverse", input.clone(), inv, not(out));
		builder.assert_product("zero_product", input.clone(), out, Lc::zero());
		builder.pop_namespace();
		Self { input, inv, out }
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		let input = witness.eval(&self.input)?;
		let inv = inverse_or_zero(input);
		witness.set(self.inv, inv)?;
		witness.set(self.out, F::ONE - input * inv)?;
		Ok(())
	}
}

/// `out = 1` iff `a = b`.
#[derive(Debug, Clone)]
pub struct IsEqual {
	is_zero: IsZero,
	pub out: WireId,
}

impl IsEqual {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		a: impl Into<Lc>,
		b: impl Into<Lc>,
	) -> Self {
		let (a, b): (Lc, Lc) = (a.into(), b.into());
		let is_zero = IsZero::new(builder, name, b - a);
		Self {
			out: is_zero.out,
			is_zero,
		}
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		self.is_zero.populate(witness)
	}
}

/// `out = 1` iff `a < b`, for `a` and `b` both below `2^n`.
///
/// Decomposes `a + 2^n - b` into `n + 1` bits. The top bit is set exactly when no borrow
/// occurred, that is when `a >= b`.
#[derive(Debug, Clone)]
pub struct LessThan {
	bits: Num2Bits,
	pub out: WireId,
}

impl LessThan {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		n: usize,
		a: impl Into<Lc>,
		b: impl Into<Lc>,
	) -> Result<Self, anyhow::Error> {
		let max = max_comparison_bits::<F>();
		ensure!(n <= max, Error::ComparatorTooWide { n, max });

		let (a, b): (Lc, Lc) = (a.into(), b.into());
		builder.push_namespace(name);
		let offset = a - b + Lc::constant(pow2(n));
		let bits = Num2Bits::new(builder, "bits", offset, n + 1)?;
		let out = builder.add_linear_combination("out", not(bits.bits[n]));
		builder.pop_namespace();

		Ok(Self { bits, out })
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		self.bits.populate(witness)?;
		witness.fill_linear_combination(self.out)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use proptest::prelude::*;
	use zkfloat_core::{ConstraintSystem, Visibility};

	use super::*;
	use crate::builder::test_utils::{assert_unsatisfied, set_u64, validate_circuit};

	fn is_zero_circuit() -> (ConstraintSystem<F>, WireId, IsZero) {
		let mut builder = ConstraintSystemBuilder::new();
		let x = builder.add_input("x", Visibility::Private);
		let is_zero = IsZero::new(&mut builder, "is_zero", x);
		(builder.build().unwrap(), x, is_zero)
	}

	#[test]
	fn test_inverse_or_zero() {
		assert_eq!(inverse_or_zero(F::ZERO), F::ZERO);
		let seven = F::from(7u64);
		assert_eq!(inverse_or_zero(seven) * seven, F::ONE);
	}

	fn less_than_circuit(n: usize) -> (ConstraintSystem<F>, [WireId; 2], LessThan) {
		let mut builder = ConstraintSystemBuilder::new();
		let a = builder.add_input("a", Visibility::Private);
		let b = builder.add_input("b", Visibility::Private);
		let lt = LessThan::new(&mut builder, "lt", n, a, b).unwrap();
		(builder.build().unwrap(), [a, b], lt)
	}

	#[test]
	fn test_is_zero() {
		let (cs, x, is_zero) = is_zero_circuit();
		for (value, expected) in [(F::ZERO, F::ONE), (F::from(7u64), F::ZERO), (-F::ONE, F::ZERO)] {
			let mut witness = Witness::new(&cs);
			witness.set(x, value).unwrap();
			is_zero.populate(&mut witness).unwrap();
			validate_circuit(&cs, &witness).unwrap();
			assert_eq!(witness.get(is_zero.out).unwrap(), expected);
		}
	}

	#[test]
	fn test_is_zero_wrong_proposal() {
		let (cs, x, is_zero) = is_zero_circuit();

		// Claim that 7 is zero.
		let mut witness = Witness::new(&cs);
		witness.set(x, F::from(7u64)).unwrap();
		is_zero.populate(&mut witness).unwrap();
		witness.replace(is_zero.out, F::ONE).unwrap();
		witness.replace(is_zero.inv, F::ZERO).unwrap();
		assert_unsatisfied(&cs, &witness);

		// Claim that 0 is not zero. Any inverse proposal is rejected.
		let mut witness = Witness::new(&cs);
		witness.set(x, F::ZERO).unwrap();
		is_zero.populate(&mut witness).unwrap();
		witness.replace(is_zero.out, F::ZERO).unwrap();
		witness.replace(is_zero.inv, F::from(5u64)).unwrap();
		assert_unsatisfied(&cs, &witness);
	}

	#[test]
	fn test_is_equal() {
		let mut builder = ConstraintSystemBuilder::new();
		let a = builder.add_input("a", Visibility::Private);
		let b = builder.add_input("b", Visibility::Private);
		let eq = IsEqual::new(&mut builder, "eq", a, b);
		let cs = builder.build().unwrap();

		for (x, y) in [(3, 3), (3, 4), (0, 0)] {
			let mut witness = Witness::new(&cs);
			set_u64(&mut witness, &[(a, x), (b, y)]).unwrap();
			eq.populate(&mut witness).unwrap();
			validate_circuit(&cs, &witness).unwrap();
			assert_eq!(witness.get(eq.out).unwrap(), F::from((x == y) as u64));
		}
	}

	#[test]
	fn test_comparator_width_limit() {
		let mut builder = ConstraintSystemBuilder::new();
		let a = builder.add_input("a", Visibility::Private);
		let err = LessThan::new(&mut builder, "lt", 253, a, a).unwrap_err();
		assert_matches!(
			err.downcast_ref::<Error>(),
			Some(Error::ComparatorTooWide { n: 253, max: 252 })
		);
		assert!(LessThan::new(&mut builder, "lt", 252, a, a).is_ok());
	}

	#[test]
	fn test_less_than_flipped_flag_rejected() {
		let (cs, [a, b], lt) = less_than_circuit(8);
		let mut witness = Witness::new(&cs);
		set_u64(&mut witness, &[(a, 10), (b, 200)]).unwrap();
		lt.populate(&mut witness).unwrap();
		assert_eq!(witness.get(lt.out).unwrap(), F::ONE);

		// Flipping the top bit breaks the recomposition.
		let top = lt.bits.bits[8];
		witness.replace(top, F::ONE).unwrap();
		witness.replace(lt.out, F::ZERO).unwrap();
		assert_unsatisfied(&cs, &witness);
	}

	proptest! {
		#[test]
		fn test_less_than_matches_integers(n in 1usize..=64, a in any::<u64>(), b in any::<u64>()) {
			let mask = if n == 64 { u64::MAX } else { (1 << n) - 1 };
			let (a, b) = (a & mask, b & mask);
			let (cs, [a_wire, b_wire], lt) = less_than_circuit(n);
			let mut witness = Witness::new(&cs);
			set_u64(&mut witness, &[(a_wire, a), (b_wire, b)]).unwrap();
			lt.populate(&mut witness).unwrap();
			validate_circuit(&cs, &witness).unwrap();
			prop_assert_eq!(witness.get(lt.out).unwrap(), F::from((a < b) as u64));
		}
	}
}
