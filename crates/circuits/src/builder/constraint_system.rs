// Copyright 2025 zkfloat developers

use zkfloat_core::{
	Constraint, ConstraintSystem, Error as CoreError, Visibility, WireDef, WireId, WireInfo,
};
use zkfloat_utils::bail;

use crate::builder::types::{Lc, F};

/// Collects wires and rank-1 constraints while gadgets are declared.
#[derive(Debug, Default)]
pub struct ConstraintSystemBuilder {
	wires: Vec<WireInfo<F>>,
	constraints: Vec<Constraint<F>>,
	namespace_path: Vec<String>,
}

impl ConstraintSystemBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Compiles the declared relations.
	///
	/// Fails if a constraint or a linear combination refers to an unknown wire, or if some
	/// committed wire appears in no constraint at all. A committed wire is a hint or a product
	/// result, so one that nothing constrains could be set to anything by the prover.
	pub fn build(self) -> Result<ConstraintSystem<F>, anyhow::Error> {
		let constraint_system = ConstraintSystem {
			wires: self.wires,
			constraints: self.constraints,
		};

		let referenced = constraint_system
			.constraints
			.iter()
			.flat_map(|constraint| constraint.wires())
			.chain(
				constraint_system
					.wires
					.iter()
					.filter_map(|info| match &info.def {
						WireDef::LinearCombination(lc) => Some(lc.wires()),
						_ => None,
					})
					.flatten(),
			);
		for id in referenced {
			if !constraint_system.is_valid_wire_id(id) {
				bail!(CoreError::InvalidWireId(id));
			}
		}

		if let Some(&id) = constraint_system.unconstrained_committed_wires().first() {
			bail!(CoreError::UnconstrainedWire {
				wire: constraint_system.label(id),
			});
		}

		Ok(constraint_system)
	}

	fn add_wire(&mut self, name: impl ToString, def: WireDef<F>) -> WireId {
		let id = WireId::from_index(self.wires.len());
		let name = self.scoped_name(name);
		self.wires.push(WireInfo { id, name, def });
		id
	}

	pub fn add_input(&mut self, name: impl ToString, visibility: Visibility) -> WireId {
		self.add_wire(name, WireDef::Input(visibility))
	}

	/// Declares a wire whose value a gadget supplies during witness generation.
	///
	/// The caller must bind it with at least one constraint, otherwise [`Self::build`] fails.
	pub fn add_committed(&mut self, name: impl ToString) -> WireId {
		self.add_wire(name, WireDef::Committed)
	}

	pub fn add_committed_multiple(&mut self, name: impl ToString, n: usize) -> Vec<WireId> {
		let name = name.to_string();
		(0..n)
			.map(|i| self.add_committed(format!("{name}_{i}")))
			.collect()
	}

	/// Declares a virtual wire equal to `lc`. It costs no constraint.
	pub fn add_linear_combination(&mut self, name: impl ToString, lc: impl Into<Lc>) -> WireId {
		self.add_wire(name, WireDef::LinearCombination(lc.into()))
	}

	/// Adds the constraint `a * b = c`.
	pub fn assert_product(
		&mut self,
		name: impl ToString,
		a: impl Into<Lc>,
		b: impl Into<Lc>,
		c: impl Into<Lc>,
	) {
		let name = self.scoped_name(name);
		self.constraints.push(Constraint {
			name,
			a: a.into(),
			b: b.into(),
			c: c.into(),
		});
	}

	pub fn assert_zero(&mut self, name: impl ToString, lc: impl Into<Lc>) {
		self.assert_product(name, lc, Lc::one(), Lc::zero());
	}

	pub fn assert_equal(&mut self, name: impl ToString, lhs: impl Into<Lc>, rhs: impl Into<Lc>) {
		let (lhs, rhs): (Lc, Lc) = (lhs.into(), rhs.into());
		self.assert_zero(name, lhs - rhs);
	}

	/// Adds `x * (x - 1) = 0`.
	pub fn assert_bool(&mut self, name: impl ToString, x: impl Into<Lc>) {
		let x: Lc = x.into();
		let x_minus_one = x.clone() - Lc::one();
		self.assert_product(name, x, x_minus_one, Lc::zero());
	}

	fn scoped_name(&self, name: impl ToString) -> String {
		let name = name.to_string();
		if self.namespace_path.is_empty() {
			name
		} else {
			format!("{}::{name}", self.namespace_path.join("::"))
		}
	}

	/// Anything pushed to the namespace will become part of wire and constraint names, which is
	/// useful for debugging.
	///
	/// Use `pop_namespace(&mut self)` to remove the latest name.
	///
	/// Example
	/// ```
	/// use zkfloat_circuits::builder::ConstraintSystemBuilder;
	/// use zkfloat_core::Visibility;
	///
	/// let mut builder = ConstraintSystemBuilder::new();
	/// builder.push_namespace("a");
	/// let x = builder.add_input("x", Visibility::Public);
	/// builder.push_namespace("b");
	/// let y = builder.add_input("y", Visibility::Private);
	/// builder.pop_namespace();
	/// builder.pop_namespace();
	/// let z = builder.add_input("z", Visibility::Private);
	///
	/// let cs = builder.build().unwrap();
	/// assert_eq!(cs.wire(x).unwrap().name, "a::x");
	/// assert_eq!(cs.wire(y).unwrap().name, "a::b::y");
	/// assert_eq!(cs.wire(z).unwrap().name, "z");
	/// ```
	pub fn push_namespace(&mut self, name: impl ToString) {
		self.namespace_path.push(name.to_string());
	}

	pub fn pop_namespace(&mut self) {
		self.namespace_path.pop();
	}
}

/// Returns `F::ONE - x`, the negation of a boolean.
pub fn not(x: impl Into<Lc>) -> Lc {
	let x: Lc = x.into();
	Lc::one() - x
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	#[test]
	fn test_unconstrained_committed_wire_is_rejected() {
		let mut builder = ConstraintSystemBuilder::new();
		builder.push_namespace("gadget");
		let _hint = builder.add_committed("hint");
		let err = builder.build().unwrap_err();
		assert_matches!(
			err.downcast_ref::<CoreError>(),
			Some(CoreError::UnconstrainedWire { wire }) if wire.starts_with("gadget::hint")
		);
	}

	#[test]
	fn test_committed_wire_bound_through_linear_combination() {
		let mut builder = ConstraintSystemBuilder::new();
		let x = builder.add_input("x", Visibility::Private);
		let hint = builder.add_committed("hint");
		let sum = builder.add_linear_combination("sum", Lc::from(x) + hint);
		builder.assert_bool("sum_bool", sum);
		let cs = builder.build().unwrap();
		assert_eq!(cs.n_wires(), 3);
		assert_eq!(cs.constraints.len(), 1);
	}

	#[test]
	fn test_invalid_wire_reference() {
		let mut builder = ConstraintSystemBuilder::new();
		builder.assert_zero("bogus", WireId::from_index(5));
		let err = builder.build().unwrap_err();
		assert_matches!(err.downcast_ref::<CoreError>(), Some(CoreError::InvalidWireId(_)));
	}
}
