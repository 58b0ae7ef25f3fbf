// Copyright 2025 zkfloat developers

//! Plain integer implementation of [`super::FloatAdd`], for cross-checking circuit outputs.

use anyhow::anyhow;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use super::{FloatFormat, FloatValue};

/// Adds two well-formed floats with the same ordering, bypass, normalization and rounding rules
/// as the circuit.
///
/// Fails only when the result exponent no longer fits in a `u64`.
pub fn add(
	format: FloatFormat,
	a: FloatValue,
	b: FloatValue,
) -> Result<FloatValue, anyhow::Error> {
	let p = format.precision() as u64;
	let wide = format.wide_precision() as u64;

	let (alpha, beta) = if (a.exponent, a.mantissa) < (b.exponent, b.mantissa) {
		(b, a)
	} else {
		(a, b)
	};

	let diff = alpha.exponent - beta.exponent;
	if alpha.exponent == 0 || diff >= p + 2 {
		return Ok(alpha);
	}

	let sum = (BigUint::from(alpha.mantissa) << diff) + BigUint::from(beta.mantissa);
	let top = sum.bits() - 1;
	let normalized = sum << (wide - top);
	let exponent = beta.exponent as u128 + top as u128 - p as u128;

	let round_amount = wide - p;
	let half = BigUint::one() << (round_amount - 1);
	let threshold = (BigUint::one() << (wide + 1)) - &half;
	let (exponent, mantissa) = if normalized < threshold {
		(exponent, (normalized + half) >> round_amount)
	} else {
		(exponent + 1, BigUint::one() << p)
	};

	Ok(FloatValue {
		exponent: exponent
			.try_into()
			.map_err(|_| anyhow!("exponent {exponent} overflows u64"))?,
		mantissa: mantissa
			.to_u128()
			.ok_or_else(|| anyhow!("mantissa {mantissa} overflows u128"))?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_small_sums() {
		let format = FloatFormat::new(3, 2).unwrap();
		let sum = |a: (u64, u128), b: (u64, u128)| {
			add(format, FloatValue::new(a.0, a.1), FloatValue::new(b.0, b.1)).unwrap()
		};
		assert_eq!(sum((1, 6), (1, 6)), FloatValue::new(2, 6));
		assert_eq!(sum((1, 4), (0, 0)), FloatValue::new(1, 4));
		assert_eq!(sum((0, 0), (0, 0)), FloatValue::ZERO);
		// 5 * 2^0 + 6 * 2^-1 = 8 = 4 * 2^1
		assert_eq!(sum((2, 5), (1, 6)), FloatValue::new(3, 4));
		// 7 * 2^2 + 7 * 2^0 = 35, rounded to 4 * 2^3
		assert_eq!(sum((4, 7), (2, 7)), FloatValue::new(5, 4));
	}

	#[test]
	fn test_sum_value_is_close() {
		let format = FloatFormat::new(8, 10).unwrap();
		let a = FloatValue::new(100, 1500);
		let b = FloatValue::new(97, 1100);
		let sum = add(format, a, b).unwrap();
		assert!(format.is_well_formed(sum));
		let exact = format.to_f64(a) + format.to_f64(b);
		let ulp = 2f64.powi(sum.exponent as i32 - 10);
		assert!((format.to_f64(sum) - exact).abs() <= ulp / 2.0);
	}
}
