// Copyright 2025 zkfloat developers

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use zkfloat_circuits::{
	builder::{
		test_utils::{assert_unsatisfied, validate_circuit},
		types::{Witness, F},
		ConstraintSystemBuilder,
	},
	float::{reference, FloatAdd, FloatFormat, FloatValue},
};
use zkfloat_core::{ConstraintSystem, ConstraintSystemStat, Visibility};

fn circuit(format: FloatFormat) -> (ConstraintSystem<F>, FloatAdd) {
	let mut builder = ConstraintSystemBuilder::new();
	let add = FloatAdd::new_with_inputs(&mut builder, "float", format, Visibility::Public).unwrap();
	(builder.build().unwrap(), add)
}

fn prove_sum(
	cs: &ConstraintSystem<F>,
	add: &FloatAdd,
	a: FloatValue,
	b: FloatValue,
) -> FloatValue {
	let mut witness = Witness::new(cs);
	add.assign_inputs(&mut witness, a, b).unwrap();
	add.populate(&mut witness).unwrap();
	validate_circuit(cs, &witness).unwrap();
	add.output(&witness).unwrap()
}

fn float_strategy(format: FloatFormat) -> impl Strategy<Value = FloatValue> {
	let mantissas = format.min_mantissa()..=format.max_mantissa();
	prop_oneof![
		1 => Just(FloatValue::ZERO),
		8 => (1..=format.max_exponent(), mantissas).prop_map(|(e, m)| FloatValue::new(e, m)),
	]
}

fn operands(
	exponent_bits: usize,
	precision: usize,
) -> impl Strategy<Value = (FloatValue, FloatValue)> {
	let format = FloatFormat::new(exponent_bits, precision).unwrap();
	(float_strategy(format), float_strategy(format))
}

#[test]
fn test_shape_is_independent_of_inputs() {
	let format = FloatFormat::new(8, 23).unwrap();
	let (cs, _) = circuit(format);
	let (cs_again, _) = circuit(format);
	assert_eq!(cs.n_wires(), cs_again.n_wires());
	assert_eq!(cs.constraints, cs_again.constraints);
	assert_eq!(cs.public_inputs().count(), 4);
	assert!(cs.unconstrained_committed_wires().is_empty());

	let stat = ConstraintSystemStat::new(&cs, 2);
	assert_eq!(stat.n_public_inputs(), 4);
	assert_eq!(stat.n_constraints(), cs.constraints.len());
	assert!(stat.per_namespace().contains_key("float::add"));
}

#[test]
fn test_single_precision_like_format() {
	let format = FloatFormat::new(8, 23).unwrap();
	let (cs, add) = circuit(format);
	let mut rng = StdRng::seed_from_u64(0x5eed);
	for _ in 0..20 {
		let a = format.random_value_in(&mut rng, 100..=130);
		let b = format.random_value_in(&mut rng, 100..=130);
		let sum = prove_sum(&cs, &add, a, b);
		assert_eq!(sum, reference::add(format, a, b).unwrap());
		assert!(format.is_well_formed(sum));
	}
}

#[test]
fn test_large_precision() {
	let format = FloatFormat::new(11, 100).unwrap();
	let (cs, add) = circuit(format);
	let mut rng = StdRng::seed_from_u64(7);
	for _ in 0..5 {
		let a = format.random_value_in(&mut rng, 1000..=1050);
		let b = format.random_value_in(&mut rng, 1000..=1050);
		assert_eq!(prove_sum(&cs, &add, a, b), reference::add(format, a, b).unwrap());
	}
}

#[test]
fn test_rejects_malformed_operands() {
	let format = FloatFormat::new(3, 2).unwrap();
	let (cs, add) = circuit(format);
	for bad in [FloatValue::new(3, 2), FloatValue::new(0, 4), FloatValue::new(2, 8)] {
		let mut witness = Witness::new(&cs);
		add.assign_inputs(&mut witness, bad, FloatValue::new(1, 4)).unwrap();
		add.populate(&mut witness).unwrap();
		assert_unsatisfied(&cs, &witness);
	}
}

#[test]
fn test_rejects_wrong_sum() {
	let format = FloatFormat::new(3, 2).unwrap();
	let (cs, add) = circuit(format);
	let mut witness = Witness::new(&cs);
	add.assign_inputs(&mut witness, FloatValue::new(1, 6), FloatValue::new(1, 6))
		.unwrap();
	add.populate(&mut witness).unwrap();
	witness.replace(add.output.mantissa, F::from(7u64)).unwrap();
	assert_unsatisfied(&cs, &witness);
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn test_matches_reference((a, b) in operands(5, 6)) {
		let format = FloatFormat::new(5, 6).unwrap();
		let (cs, add) = circuit(format);
		prop_assert_eq!(prove_sum(&cs, &add, a, b), reference::add(format, a, b).unwrap());
	}

	#[test]
	fn test_commutative((a, b) in operands(4, 3)) {
		let format = FloatFormat::new(4, 3).unwrap();
		let (cs, add) = circuit(format);
		prop_assert_eq!(prove_sum(&cs, &add, a, b), prove_sum(&cs, &add, b, a));
	}

	#[test]
	fn test_rounding_error_is_at_most_half_ulp((a, b) in operands(6, 12)) {
		let format = FloatFormat::new(6, 12).unwrap();
		let (cs, add) = circuit(format);
		let sum = prove_sum(&cs, &add, a, b);
		let exact = format.to_f64(a) + format.to_f64(b);
		// A bypassed operand is below half an ulp of the larger one as well.
		let ulp = 2f64.powi(sum.exponent as i32 - 12);
		prop_assert!((format.to_f64(sum) - exact).abs() <= ulp / 2.0);
	}
}
