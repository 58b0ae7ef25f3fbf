// Copyright 2025 zkfloat developers

//! Prime field backend for the floating-point gadgets.
//!
//! Circuits are instantiated over the BN254 scalar field. Field elements carry no notion of
//! magnitude, so this crate also provides the integer views (bit access, bit length, conversion
//! to machine integers) that witness generation needs, and the bit-width margins that keep
//! integer reasoning sound for a given modulus.

pub mod error;
pub mod integer;

pub use ark_bn254::Fr;
pub use ark_ff::{AdditiveGroup, Field, PrimeField};
pub use error::*;
pub use integer::*;
