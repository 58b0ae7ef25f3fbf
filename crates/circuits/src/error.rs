// Copyright 2025 zkfloat developers

/// Structural errors, raised while a gadget is declared and before any witness exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("decomposition into {bits} bits exceeds the field margin of {max} bits")]
	BitWidthTooLarge { bits: usize, max: usize },

	#[error("comparison over {n} bits exceeds the field margin of {max} bits")]
	ComparatorTooWide { n: usize, max: usize },

	#[error("shift by {shift} is not smaller than the bit width {bits}")]
	InvalidShift { shift: usize, bits: usize },

	#[error("wide precision {wide} must be greater than the precision {p}")]
	InvalidPrecision { p: usize, wide: usize },

	#[error("invalid float format with {exponent_bits} exponent bits and precision {precision}: {reason}")]
	InvalidFormat {
		exponent_bits: usize,
		precision: usize,
		reason: &'static str,
	},

	#[error("{gadget} requires a non-empty range")]
	EmptyRange { gadget: &'static str },
}
