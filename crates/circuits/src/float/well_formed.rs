// Copyright 2025 zkfloat developers

use zkfloat_field::pow2;

use super::FloatFormat;
use crate::{
	bits::CheckBitLength,
	builder::{
		types::{Lc, Witness},
		ConstraintSystemBuilder,
	},
	comparison::IsZero,
	select::{And, IfThenElse},
};

/// Asserts that `(exponent, mantissa)` is a well-formed float of the given format.
///
/// Selects `mantissa == 0` when the exponent is zero and otherwise the conjunction of "the
/// exponent fits in `k` bits" and "`mantissa - 2^p` fits in `p` bits", then asserts the selected
/// flag is one.
#[derive(Debug, Clone)]
pub struct CheckWellFormedness {
	is_e_zero: IsZero,
	is_m_zero: IsZero,
	e_bits: CheckBitLength,
	m_bits: CheckBitLength,
	in_range: And,
	selected: IfThenElse,
}

impl CheckWellFormedness {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		format: FloatFormat,
		exponent: impl Into<Lc>,
		mantissa: impl Into<Lc>,
	) -> Result<Self, anyhow::Error> {
		let (exponent, mantissa): (Lc, Lc) = (exponent.into(), mantissa.into());
		let p = format.precision();

		builder.push_namespace(name);
		let is_e_zero = IsZero::new(builder, "is_e_zero", exponent.clone());
		let is_m_zero = IsZero::new(builder, "is_m_zero", mantissa.clone());
		let e_bits = CheckBitLength::new(builder, "e_bits", exponent, format.exponent_bits())?;
		let m_bits = CheckBitLength::new(
			builder,
			"m_bits",
			mantissa - Lc::constant(pow2(p)),
			p,
		)?;
		let in_range = And::new(builder, "in_range", e_bits.out, m_bits.out);
		let selected =
			IfThenElse::new(builder, "selected", is_e_zero.out, is_m_zero.out, in_range.out);
		builder.assert_equal("well_formed", selected.out, Lc::one());
		builder.pop_namespace();

		Ok(Self {
			is_e_zero,
			is_m_zero,
			e_bits,
			m_bits,
			in_range,
			selected,
		})
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		self.is_e_zero.populate(witness)?;
		self.is_m_zero.populate(witness)?;
		self.e_bits.populate(witness)?;
		self.m_bits.populate(witness)?;
		self.in_range.populate(witness)?;
		self.selected.populate(witness)
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use zkfloat_core::{ConstraintSystem, Visibility};

	use super::*;
	use crate::{
		builder::{
			test_utils::{assert_unsatisfied, validate_circuit},
			types::F,
		},
		float::{FloatValue, FloatWires},
	};

	fn circuit(format: FloatFormat) -> (ConstraintSystem<F>, FloatWires, CheckWellFormedness) {
		let mut builder = ConstraintSystemBuilder::new();
		let input = FloatWires::add_input(&mut builder, 0, Visibility::Private);
		let check =
			CheckWellFormedness::new(&mut builder, "wf", format, input.exponent, input.mantissa)
				.unwrap();
		(builder.build().unwrap(), input, check)
	}

	fn accepts(format: FloatFormat, value: FloatValue) -> bool {
		let (cs, input, check) = circuit(format);
		let mut witness = Witness::new(&cs);
		input.assign(&mut witness, value).unwrap();
		check.populate(&mut witness).unwrap();
		validate_circuit(&cs, &witness).is_ok()
	}

	#[test]
	fn test_small_format() {
		let format = FloatFormat::new(3, 2).unwrap();
		assert!(accepts(format, FloatValue::ZERO));
		assert!(accepts(format, FloatValue::new(1, 4)));
		assert!(accepts(format, FloatValue::new(7, 7)));
		assert!(!accepts(format, FloatValue::new(0, 5)));
		assert!(!accepts(format, FloatValue::new(3, 2)));
		assert!(!accepts(format, FloatValue::new(3, 8)));
		assert!(!accepts(format, FloatValue::new(8, 4)));
	}

	#[test]
	fn test_forged_range_flag() {
		let format = FloatFormat::new(3, 2).unwrap();
		let (cs, input, check) = circuit(format);
		let mut witness = Witness::new(&cs);
		input.assign(&mut witness, FloatValue::new(3, 2)).unwrap();
		check.populate(&mut witness).unwrap();
		// Claim that 2 - 4 fits in 2 bits.
		witness.replace(check.m_bits.out, F::from(1u64)).unwrap();
		witness.replace(check.in_range.out, F::from(1u64)).unwrap();
		witness.replace(check.selected.out, F::from(1u64)).unwrap();
		assert_unsatisfied(&cs, &witness);
	}

	proptest! {
		#[test]
		fn test_matches_host_check(exponent in 0u64..40, mantissa in 0u128..1200) {
			let format = FloatFormat::new(5, 9).unwrap();
			let value = FloatValue::new(exponent, mantissa);
			prop_assert_eq!(accepts(format, value), format.is_well_formed(value));
		}
	}
}
