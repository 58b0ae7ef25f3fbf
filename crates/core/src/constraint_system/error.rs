// Copyright 2025 zkfloat developers

use crate::WireId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("no wire exists in this constraint system with id {0}")]
	InvalidWireId(WireId),

	#[error("witness for {wire} is missing")]
	MissingWitness { wire: String },

	#[error("wire {wire} has already been assigned")]
	WireAlreadyAssigned { wire: String },

	#[error("wire {wire} is not defined by a linear combination")]
	NotALinearCombination { wire: String },

	#[error("witness has {got} wires but the constraint system has {expected}")]
	WitnessSizeMismatch { expected: usize, got: usize },

	#[error("{wire} failed witness validation: linear combination evaluates to {expected}, got {got}")]
	LinearCombinationMismatch {
		wire: String,
		expected: String,
		got: String,
	},

	#[error("constraint {name} is not satisfied: a * b = {lhs}, c = {rhs}")]
	ConstraintNotSatisfied {
		name: String,
		lhs: String,
		rhs: String,
	},

	#[error("committed wire {wire} does not appear in any constraint")]
	UnconstrainedWire { wire: String },
}
