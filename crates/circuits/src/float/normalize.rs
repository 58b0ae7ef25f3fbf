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
	msnzb::Msnzb,
	Error,
};

/// Rescales a non-zero mantissa of up to `P + 1` bits so that its top bit sits at position `P`.
///
/// With `one_hot` marking the highest set bit `l`, the gadget takes `l = Σ one_hot[i] * i` and
/// `2^(P - l) = Σ one_hot[i] * 2^(P - i)` as inner products, so no variable shift is needed. The
/// outputs are `exponent + l - p` and `mantissa * 2^(P - l)`, a mantissa at scale `P`.
#[derive(Debug, Clone)]
pub struct Normalize {
	mantissa: Lc,
	msnzb: Msnzb,
	ell: WireId,
	scale: WireId,
	pub exponent_out: WireId,
	pub mantissa_out: WireId,
}

impl Normalize {
	#[instrument(skip_all, level = "debug")]
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		format: FloatFormat,
		wide_precision: usize,
		exponent: impl Into<Lc>,
		mantissa: impl Into<Lc>,
		skip_checks: impl Into<Lc>,
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

		builder.push_namespace(name);
		let msnzb =
			Msnzb::new(builder, "msnzb", mantissa.clone(), skip_checks, wide_precision + 1)?;

		let ell = builder.add_linear_combination(
			"ell",
			msnzb
				.one_hot
				.iter()
				.enumerate()
				.fold(Lc::zero(), |lc, (i, &bit)| lc.add_term(bit, F::from(i as u64))),
		);
		let scale = builder.add_linear_combination(
			"scale",
			msnzb
				.one_hot
				.iter()
				.enumerate()
				.fold(Lc::zero(), |lc, (i, &bit)| lc.add_term(bit, pow2(wide_precision - i))),
		);

		let exponent_out = builder.add_linear_combination(
			"exponent_out",
			exponent + ell - Lc::constant(F::from(p as u64)),
		);
		let mantissa_out = builder.add_committed("mantissa_out");
		builder.assert_product("rescale", mantissa.clone(), scale, mantissa_out);
		builder.pop_namespace();

		Ok(Self {
			mantissa,
			msnzb,
			ell,
			scale,
			exponent_out,
			mantissa_out,
		})
	}

	#[instrument(skip_all, level = "debug")]
	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		self.msnzb.populate(witness)?;
		witness.fill_linear_combination(self.ell)?;
		let scale = witness.fill_linear_combination(self.scale)?;
		witness.fill_linear_combination(self.exponent_out)?;
		let mantissa = witness.eval(&self.mantissa)?;
		witness.set(self.mantissa_out, mantissa * scale)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use zkfloat_core::{ConstraintSystem, Visibility};

	use super::*;
	use crate::builder::test_utils::{assert_unsatisfied, set_u64, validate_circuit};

	struct Circuit {
		cs: ConstraintSystem<F>,
		e: WireId,
		m: WireId,
		skip: WireId,
		normalize: Normalize,
	}

	fn circuit(format: FloatFormat, wide_precision: usize) -> Circuit {
		let mut builder = ConstraintSystemBuilder::new();
		let e = builder.add_input("e", Visibility::Private);
		let m = builder.add_input("m", Visibility::Private);
		let skip = builder.add_input("skip", Visibility::Private);
		let normalize =
			Normalize::new(&mut builder, "normalize", format, wide_precision, e, m, skip).unwrap();
		Circuit {
			cs: builder.build().unwrap(),
			e,
			m,
			skip,
			normalize,
		}
	}

	#[test]
	fn test_precision_must_grow() {
		let format = FloatFormat::new(3, 4).unwrap();
		let mut builder = ConstraintSystemBuilder::new();
		let x = builder.add_input("x", Visibility::Private);
		let err =
			Normalize::new(&mut builder, "normalize", format, 4, x, x, Lc::zero()).unwrap_err();
		assert_matches!(
			err.downcast_ref::<Error>(),
			Some(Error::InvalidPrecision { p: 4, wide: 4 })
		);
	}

	#[test]
	fn test_normalizes_sum() {
		// Two copies of (e=1, m=6) with p = 2 sum to m = 12 at exponent 1.
		let format = FloatFormat::new(3, 2).unwrap();
		let c = circuit(format, format.wide_precision());
		let mut witness = Witness::new(&c.cs);
		set_u64(&mut witness, &[(c.e, 1), (c.m, 12), (c.skip, 0)]).unwrap();
		c.normalize.populate(&mut witness).unwrap();
		validate_circuit(&c.cs, &witness).unwrap();

		// 12 = 0b1100 has its top bit at 3, rescaled to position 5.
		assert_eq!(witness.get(c.normalize.ell).unwrap(), F::from(3u64));
		assert_eq!(witness.get(c.normalize.exponent_out).unwrap(), F::from(2u64));
		assert_eq!(witness.get(c.normalize.mantissa_out).unwrap(), F::from(48u64));
	}

	#[test]
	fn test_rejects_wrong_scale() {
		let format = FloatFormat::new(3, 2).unwrap();
		let c = circuit(format, format.wide_precision());
		let mut witness = Witness::new(&c.cs);
		set_u64(&mut witness, &[(c.e, 1), (c.m, 12), (c.skip, 0)]).unwrap();
		c.normalize.populate(&mut witness).unwrap();
		witness.replace(c.normalize.mantissa_out, F::from(24u64)).unwrap();
		assert_unsatisfied(&c.cs, &witness);
	}

	#[test]
	fn test_already_normalized() {
		let format = FloatFormat::new(4, 3).unwrap();
		let c = circuit(format, 5);
		let mut witness = Witness::new(&c.cs);
		set_u64(&mut witness, &[(c.e, 6), (c.m, 0b101101), (c.skip, 0)]).unwrap();
		c.normalize.populate(&mut witness).unwrap();
		validate_circuit(&c.cs, &witness).unwrap();
		assert_eq!(witness.get(c.normalize.exponent_out).unwrap(), F::from(8u64));
		assert_eq!(witness.get(c.normalize.mantissa_out).unwrap(), F::from(0b101101u64));
	}
}
