// Copyright 2025 zkfloat developers

//! Early-return helpers shared by every crate of the workspace.
//!
//! With the `bail_panic` feature enabled the macros panic at the failure site instead of
//! returning, which gives a backtrace pointing at the exact gadget that rejected its parameters.

#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr $(,)?) => {
		panic!("{}", $err)
	};
}

#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr $(,)?) => {
		return Err($err.into())
	};
}

#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr $(,)?) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}

#[cfg(all(test, not(feature = "bail_panic")))]
mod tests {
	#[derive(Debug, PartialEq, Eq)]
	struct TooWide(usize);

	fn check_width(bits: usize) -> Result<usize, TooWide> {
		crate::ensure!(bits <= 253, TooWide(bits));
		Ok(bits)
	}

	#[test]
	fn test_ensure_passes_through() {
		assert_eq!(check_width(8), Ok(8));
	}

	#[test]
	fn test_ensure_returns_error() {
		assert_eq!(check_width(254), Err(TooWide(254)));
	}
}
