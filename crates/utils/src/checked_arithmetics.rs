// Copyright 2025 zkfloat developers

/// Number of bits needed to write `val` in binary; zero for zero.
pub const fn bit_length(val: u64) -> usize {
	(u64::BITS - val.leading_zeros()) as usize
}

/// Ceiling of the binary logarithm, i.e. the number of bits needed to index `val` distinct
/// values.
///
/// Panics when `val` is zero.
pub const fn log2_ceil_usize(val: usize) -> usize {
	assert!(val != 0);
	(usize::BITS - (val - 1).leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bit_length() {
		assert_eq!(bit_length(0), 0);
		assert_eq!(bit_length(1), 1);
		assert_eq!(bit_length(0b0101), 3);
		assert_eq!(bit_length(u64::MAX), 64);
	}

	#[test]
	fn test_log2_ceil() {
		assert_eq!(log2_ceil_usize(1), 0);
		assert_eq!(log2_ceil_usize(2), 1);
		assert_eq!(log2_ceil_usize(3), 2);
		assert_eq!(log2_ceil_usize(4), 2);
		assert_eq!(log2_ceil_usize(25), 5);
	}

	#[test]
	#[should_panic]
	fn test_log2_ceil_zero() {
		_ = log2_ceil_usize(0);
	}
}
