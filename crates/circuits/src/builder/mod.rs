// Copyright 2025 zkfloat developers

pub mod constraint_system;
pub mod test_utils;
pub mod types;

pub use constraint_system::{not, ConstraintSystemBuilder};
