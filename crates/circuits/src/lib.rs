// Copyright 2025 zkfloat developers

//! Arithmetic circuit gadgets for floating-point addition over a prime field.
//!
//! Gadgets are declared against a [`builder::ConstraintSystemBuilder`] and later populate a
//! [`zkfloat_core::WitnessIndex`] for one concrete instance. Each gadget follows the same two
//! steps: `new` declares wires and rank-1 constraints, `populate` computes the values of the wires
//! it declared from already assigned upstream wires.

pub mod bits;
pub mod builder;
pub mod comparison;
mod error;
pub mod float;
pub mod msnzb;
pub mod select;
pub mod shift;

pub use error::Error;
