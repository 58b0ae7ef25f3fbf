// Copyright 2025 zkfloat developers

//! Rank-1 constraint systems over a prime field.
//!
//! A [`ConstraintSystem`] is the compiled relation set: named wires, each either an input, a
//! committed value or a linear combination of other wires, and a list of rank-1 constraints
//! `a * b = c` over linear combinations. A [`WitnessIndex`] assigns one field element per wire for
//! a single instance, and [`validate_witness`] checks that the assignment satisfies the system.

pub mod constraint_system;
pub mod linear_combination;
pub mod wire;
pub mod witness;

pub use constraint_system::{
	error::Error, stat::ConstraintSystemStat, validate::validate_witness, Constraint,
	ConstraintSystem,
};
pub use linear_combination::LinearCombination;
pub use wire::{Visibility, WireDef, WireId, WireInfo};
pub use witness::WitnessIndex;
