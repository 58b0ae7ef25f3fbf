// Copyright 2025 zkfloat developers

use tracing::instrument;
use zkfloat_core::WireId;
use zkfloat_field::pow2;
use zkfloat_utils::ensure;

use super::FloatFormat;
use crate::{
	builder::{
		types::{Lc, Witness, F},
		ConstraintSystemBuilder,
	},
	comparison::LessThan,
	select::IfThenElse,
	shift::RightShift,
	Error,
};

/// Rounds a normalized mantissa at scale `P` down to scale `p`, to nearest with ties rounded up.
///
/// When rounding up would carry into bit `p + 1`, which happens exactly when
/// `mantissa >= 2^(P+1) - 2^(P-p-1)`, the result is `(exponent + 1, 2^p)` instead.
#[derive(Debug, Clone)]
pub struct RoundAndCheck {
	no_overflow: LessThan,
	rounded: RightShift,
	exponent_sel: IfThenElse,
	mantissa_sel: IfThenElse,
	pub exponent_out: WireId,
	pub mantissa_out: WireId,
}

impl RoundAndCheck {
	#[instrument(skip_all, level = "debug")]
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		format: FloatFormat,
		wide_precision: usize,
		exponent: impl Into<Lc>,
		mantissa: impl Into<Lc>,
	) -> Result<Self, anyhow::Error> {
		let p = format.precision();
		ensure!(
			wide_precision > p,
			Error::InvalidPrecision {
				p,
				wide: wide_precision
			}
		);
		let (exponent, mantissa): (Lc, Lc) = (exponent.into(), mantissa.into());
		let round_amount = wide_precision - p;
		let half = Lc::constant(pow2::<F>(round_amount - 1));

		builder.push_namespace(name);
		let threshold = Lc::constant(pow2::<F>(wide_precision + 1)) - half.clone();
		let no_overflow =
			LessThan::new(builder, "no_overflow", wide_precision + 1, mantissa.clone(), threshold)?;
		// The sum is decomposed even on the overflow path, where it takes one extra bit.
		let rounded = RightShift::new(
			builder,
			"rounded",
			mantissa + half,
			wide_precision + 2,
			round_amount,
		)?;
		let exponent_sel = IfThenElse::new(
			builder,
			"exponent",
			no_overflow.out,
			exponent.clone(),
			exponent + Lc::one(),
		);
		let mantissa_sel = IfThenElse::new(
			builder,
			"mantissa",
			no_overflow.out,
			rounded.out,
			Lc::constant(pow2(p)),
		);
		builder.pop_namespace();

		Ok(Self {
			exponent_out: exponent_sel.out,
			mantissa_out: mantissa_sel.out,
			no_overflow,
			rounded,
			exponent_sel,
			mantissa_sel,
		})
	}

	#[instrument(skip_all, level = "debug")]
	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		self.no_overflow.populate(witness)?;
		self.rounded.populate(witness)?;
		self.exponent_sel.populate(witness)?;
		self.mantissa_sel.populate(witness)
	}
}
