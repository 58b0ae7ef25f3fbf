// Copyright 2025 zkfloat developers

//! Boolean connectives and branchless selection.
//!
//! None of these gadgets assert that their selector or operands are boolean. Callers pass values
//! that are boolean by construction, such as comparator outputs or decomposed bits.

use zkfloat_core::WireId;

use crate::builder::{
	types::{Lc, Witness},
	ConstraintSystemBuilder,
};

/// `out = a * b`.
#[derive(Debug, Clone)]
pub struct And {
	a: Lc,
	b: Lc,
	pub out: WireId,
}

impl And {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		a: impl Into<Lc>,
		b: impl Into<Lc>,
	) -> Self {
		let (a, b): (Lc, Lc) = (a.into(), b.into());
		builder.push_namespace(name);
		let out = builder.add_committed("out");
		builder.assert_product("and", a.clone(), b.clone(), out);
		builder.pop_namespace();
		Self { a, b, out }
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		let out = witness.eval(&self.a)? * witness.eval(&self.b)?;
		witness.set(self.out, out)?;
		Ok(())
	}
}

/// `out = a + b - a * b`.
#[derive(Debug, Clone)]
pub struct Or {
	a: Lc,
	b: Lc,
	pub out: WireId,
}

impl Or {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		a: impl Into<Lc>,
		b: impl Into<Lc>,
	) -> Self {
		let (a, b): (Lc, Lc) = (a.into(), b.into());
		builder.push_namespace(name);
		let out = builder.add_committed("out");
		builder.assert_product("or", a.clone(), b.clone(), a.clone() + b.clone() - out);
		builder.pop_namespace();
		Self { a, b, out }
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		let a = witness.eval(&self.a)?;
		let b = witness.eval(&self.b)?;
		witness.set(self.out, a + b - a * b)?;
		Ok(())
	}
}

/// `out = cond * (if_true - if_false) + if_false`, i.e. `if_true` when `cond = 1` and `if_false`
/// when `cond = 0`.
#[derive(Debug, Clone)]
pub struct IfThenElse {
	cond: Lc,
	if_true: Lc,
	if_false: Lc,
	pub out: WireId,
}

impl IfThenElse {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		cond: impl Into<Lc>,
		if_true: impl Into<Lc>,
		if_false: impl Into<Lc>,
	) -> Self {
		let (cond, if_true, if_false): (Lc, Lc, Lc) =
			(cond.into(), if_true.into(), if_false.into());
		builder.push_namespace(name);
		let out = builder.add_committed("out");
		builder.assert_product(
			"select",
			cond.clone(),
			if_true.clone() - if_false.clone(),
			Lc::from(out) - if_false.clone(),
		);
		builder.pop_namespace();
		Self {
			cond,
			if_true,
			if_false,
			out,
		}
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		let cond = witness.eval(&self.cond)?;
		let if_true = witness.eval(&self.if_true)?;
		let if_false = witness.eval(&self.if_false)?;
		witness.set(self.out, cond * (if_true - if_false) + if_false)?;
		Ok(())
	}
}

/// Conditional swap: `(out_left, out_right)` is `(right, left)` when `sel = 1` and
/// `(left, right)` when `sel = 0`.
///
/// Both outputs share the single product `aux = sel * (right - left)`.
#[derive(Debug, Clone)]
pub struct Switcher {
	sel: Lc,
	left: Lc,
	right: Lc,
	aux: WireId,
	pub out_left: WireId,
	pub out_right: WireId,
}

impl Switcher {
	pub fn new(
		builder: &mut ConstraintSystemBuilder,
		name: impl ToString,
		sel: impl Into<Lc>,
		left: impl Into<Lc>,
		right: impl Into<Lc>,
	) -> Self {
		let (sel, left, right): (Lc, Lc, Lc) = (sel.into(), left.into(), right.into());
		builder.push_namespace(name);
		let aux = builder.add_committed("aux");
		builder.assert_product("swap", sel.clone(), right.clone() - left.clone(), aux);
		let out_left = builder.add_linear_combination("out_left", left.clone() + aux);
		let out_right = builder.add_linear_combination("out_right", right.clone() - aux);
		builder.pop_namespace();
		Self {
			sel,
			left,
			right,
			aux,
			out_left,
			out_right,
		}
	}

	pub fn populate(&self, witness: &mut Witness) -> Result<(), anyhow::Error> {
		let sel = witness.eval(&self.sel)?;
		let left = witness.eval(&self.left)?;
		let right = witness.eval(&self.right)?;
		witness.set(self.aux, sel * (right - left))?;
		witness.fill_linear_combination(self.out_left)?;
		witness.fill_linear_combination(self.out_right)?;
		Ok(())
	}
}
