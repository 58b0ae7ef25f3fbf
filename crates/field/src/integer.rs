// Copyright 2025 zkfloat developers

use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;

use crate::Error;

/// Largest bit width that may be decomposed without the weighted bit sum wrapping around the
/// modulus.
///
/// A sum of `b` weighted bits is below `2^b`, so `b` must stay strictly under the modulus bit size
/// for two distinct integers never to alias the same field element.
pub fn max_decomposition_bits<F: PrimeField>() -> usize {
	F::MODULUS_BIT_SIZE as usize - 1
}

/// Largest operand width accepted by a less-than comparison.
///
/// The comparator decomposes `a + 2^n - b` into `n + 1` bits, so it needs one bit of headroom
/// over [`max_decomposition_bits`].
pub fn max_comparison_bits<F: PrimeField>() -> usize {
	F::MODULUS_BIT_SIZE as usize - 2
}

/// The canonical integer representative of `x`, in `[0, modulus)`.
pub fn to_biguint<F: PrimeField>(x: F) -> BigUint {
	x.into()
}

pub fn from_u128<F: PrimeField>(x: u128) -> F {
	F::from(x)
}

/// `to_biguint(x)`, provided it fits in `target` bits.
fn checked_biguint<F: PrimeField>(x: F, target: usize) -> Result<BigUint, Error> {
	if fits_in_bits(x, target) {
		Ok(to_biguint(x))
	} else {
		Err(Error::ValueTooLarge {
			bits: bit_length(x),
			target,
		})
	}
}

pub fn to_u64<F: PrimeField>(x: F) -> Result<u64, Error> {
	let digits = checked_biguint(x, 64)?.to_u64_digits();
	Ok(digits.first().copied().unwrap_or(0))
}

pub fn to_u128<F: PrimeField>(x: F) -> Result<u128, Error> {
	let digits = checked_biguint(x, 128)?.to_u64_digits();
	Ok(digits
		.iter()
		.rev()
		.fold(0, |acc, &digit| (acc << 64) | u128::from(digit)))
}

/// `2^n` as a field element.
pub fn pow2<F: PrimeField>(n: usize) -> F {
	F::from(2u64).pow([n as u64])
}

/// The lowest `n` bits of the canonical representative of `x`, least significant first.
pub fn low_bits<F: PrimeField>(x: F, n: usize) -> Vec<bool> {
	let repr = x.into_bigint();
	(0..n).map(|i| repr.get_bit(i)).collect()
}

/// Number of significant bits of the canonical representative of `x`.
pub fn bit_length<F: PrimeField>(x: F) -> usize {
	x.into_bigint().num_bits() as usize
}

pub fn fits_in_bits<F: PrimeField>(x: F, n: usize) -> bool {
	bit_length(x) <= n
}
