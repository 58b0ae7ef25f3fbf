// Copyright 2025 zkfloat developers

use tracing::{debug, instrument};
use zkfloat_core::{Visibility, WireId};
use zkfloat_field::{pow2, Field};
use zkfloat_utils::checked_arithmetics::bit_length;

use super::{CheckWellFormedness, FloatFormat, FloatValue, FloatWires, Normalize, RoundAndCheck};
use crate::{
	builder::{
		not,
		types::{Lc, Witness, F},
		ConstraintSystemBuilder,
	},
	comparison::{IsZero, LessThan},
	select::{IfThenElse, Or, Switcher},
	shift::LeftShift,
};

/// Adds two well-formed floats of the same format.
///
/// The operands are ordered by the key `mantissa + exponent * 2^(p+1)`, which for well-formed
/// floats orders by exponent first and mantissa second. Let `alpha` be the larger operand and
/// `beta` the smaller one. When `alpha` is zero, or when the exponent difference is at least
/// `p + 2`, the result is `alpha` itself. Otherwise the mantissa of `alpha` is shifted left by the
/// exponent difference, the mantissa of `beta` is added, and the sum, taken at the exponent of
/// `beta`, is normalized to precision `2p + 1` and rounded back to precision `p`.
#[derive(Debug, Clone)]
pub struct FloatAdd {
	format: FloatFormat,
	pub inputs: [FloatWires; 2],
	well_formed: [CheckWellFormedness; 2],
	ordering: LessThan,
	exponents: Switcher,
	mantissas: Switcher,
	negligible: LessThan,
	larger_is_zero: IsZero,
	bypass: Or,
	shift: WireId,
	aligned: LeftShift,
	mantissa_sum: WireId,
	normalize: Normalize,
	round: RoundAndCheck,
	exponent_sel: IfThenElse,
	mantissa_sel: IfThenElse,
	pub output: FloatWires,
}

impl FloatAdd {
	/// Declares the adder together with its four input wires `e_0`, `m_0`, `e_1`, `m_1`.
	pub fn new_with_inputs(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		format: FloatFormat,
		visibility: Visibility,
	) -> Result<Self, anyhow::Error> {
		builder.push_namespace(name);
		let a = FloatWires::add_input(builder, 0, visibility);
		let b = FloatWires::add_input(builder, 1, visibility);
		let add = Self::new(builder, "add", format, a, b);
		builder.pop_namespace();
		add
	}

	#[instrument(skip_all, level = "debug")]
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		format: FloatFormat,
		a: FloatWires,
		b: FloatWires,
	) -> Result<Self, anyhow::Error> {
		let k = format.exponent_bits();
		let p = format.precision();

		builder.push_namespace(name);

		let well_formed = [
			CheckWellFormedness::new(builder, "well_formed_0", format, a.exponent, a.mantissa)?,
			CheckWellFormedness::new(builder, "well_formed_1", format, b.exponent, b.mantissa)?,
		];

		let key = |x: FloatWires| Lc::from(x.mantissa).add_term(x.exponent, pow2(p + 1));
		let ordering = LessThan::new(builder, "ordering", k + p + 1, key(a), key(b))?;
		let exponents = Switcher::new(builder, "exponents", ordering.out, a.exponent, b.exponent);
		let mantissas = Switcher::new(builder, "mantissas", ordering.out, a.mantissa, b.mantissa);
		let (e_alpha, e_beta) = (exponents.out_left, exponents.out_right);
		let (m_alpha, m_beta) = (mantissas.out_left, mantissas.out_right);

		let diff = Lc::from(e_alpha) - e_beta;
		let negligible = LessThan::new(
			builder,
			"negligible",
			k.max(bit_length(p as u64 + 1)),
			Lc::constant(F::from(p as u64 + 1)),
			diff.clone(),
		)?;
		let larger_is_zero = IsZero::new(builder, "larger_is_zero", e_alpha);
		let bypass = Or::new(builder, "bypass", negligible.out, larger_is_zero.out);

		let shift = builder.add_committed("shift");
		builder.assert_product("shift", not(bypass.out), diff, shift);
		let aligned = LeftShift::new(builder, "aligned", m_alpha, shift, Lc::zero(), p + 2)?;
		let mantissa_sum =
			builder.add_linear_combination("mantissa_sum", Lc::from(aligned.out) + m_beta);

		let wide_precision = format.wide_precision();
		let normalize = Normalize::new(
			builder,
			"normalize",
			format,
			wide_precision,
			e_beta,
			mantissa_sum,
			bypass.out,
		)?;
		let round = RoundAndCheck::new(
			builder,
			"round",
			format,
			wide_precision,
			normalize.exponent_out,
			normalize.mantissa_out,
		)?;

		let exponent_sel =
			IfThenElse::new(builder, "exponent_out", bypass.out, e_alpha, round.exponent_out);
		let mantissa_sel =
			IfThenElse::new(builder, "mantissa_out", bypass.out, m_alpha, round.mantissa_out);
		let output = FloatWires {
			exponent: exponent_sel.out,
			mantissa: mantissa_sel.out,
		};

		builder.pop_namespace();

		Ok(Self {
			format,
			inputs: [a, b],
			well_formed,
			ordering,
			exponents,
			mantissas,
			negligible,
			larger_is_zero,
			bypass,
			shift,
			aligned,
			mantissa_sum,
			normalize,
			round,
			exponent_sel,
			mantissa_sel,
			output,
		})
	}

	pub const fn format(&self) -> FloatFormat {
		self.format
	}

	/// Assigns both operands to the input wires.
	pub fn assign_inputs(
		&self,
		witness: &mut Witness,
		a: FloatValue,
		b: FloatValue,
	) -> Result<(), anyhow::Error> {
		self.inputs[0].assign(witness, a)?;
		self.inputs[1].assign(witness, b)
	}

	#[instrument(skip_all, level = "debug")]
	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		for check in &self.well_formed {
			check.populate(witness)?;
		}

		self.ordering.populate(witness)?;
		self.exponents.populate(witness)?;
		self.mantissas.populate(witness)?;
		let swapped = witness.get(self.ordering.out)? == F::ONE;

		self.negligible.populate(witness)?;
		self.larger_is_zero.populate(witness)?;
		self.bypass.populate(witness)?;
		let bypass = witness.get(self.bypass.out)?;

		let diff = witness.get(self.exponents.out_left)? - witness.get(self.exponents.out_right)?;
		let shift = (F::ONE - bypass) * diff;
		witness.set(self.shift, shift)?;
		debug!(swapped, bypass = bypass == F::ONE, %shift, "routed float addition");

		self.aligned.populate(witness)?;
		witness.fill_linear_combination(self.mantissa_sum)?;
		self.normalize.populate(witness)?;
		self.round.populate(witness)?;
		self.exponent_sel.populate(witness)?;
		self.mantissa_sel.populate(witness)
	}

	/// Reads the sum back from a populated witness.
	pub fn output(&self, witness: &Witness) -> Result<FloatValue, anyhow::Error> {
		self.output.read(witness)
	}
}
