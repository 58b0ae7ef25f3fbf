// Copyright 2025 zkfloat developers

use zkfloat_core::{validate_witness, ConstraintSystem, Error as CoreError, WireId};

use super::types::{Witness, F};

pub fn validate_circuit(
	constraint_system: &ConstraintSystem<F>,
	witness: &Witness,
) -> Result<(), anyhow::Error> {
	validate_witness(constraint_system, witness)?;
	Ok(())
}

/// Panics unless `witness` violates some relation of `constraint_system`.
///
/// A missing or misplaced value does not count: the assignment must be complete and rejected by
/// a constraint or a linear combination check.
pub fn assert_unsatisfied(constraint_system: &ConstraintSystem<F>, witness: &Witness) {
	match validate_witness(constraint_system, witness) {
		Err(CoreError::ConstraintNotSatisfied { .. })
		| Err(CoreError::LinearCombinationMismatch { .. }) => {}
		Err(err) => panic!("witness is incomplete rather than unsatisfying: {err}"),
		Ok(()) => panic!("witness unexpectedly satisfies the constraint system"),
	}
}

pub fn set_u64(witness: &mut Witness, assignments: &[(WireId, u64)]) -> Result<(), anyhow::Error> {
	for &(id, value) in assignments {
		witness.set(id, F::from(value))?;
	}
	Ok(())
}
