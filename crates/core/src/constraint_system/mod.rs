// Copyright 2025 zkfloat developers

pub mod error;
pub mod stat;
pub mod validate;

use std::{collections::HashSet, fmt};

use zkfloat_field::Field;

use crate::{
	linear_combination::LinearCombinationNamed, LinearCombination, Visibility, WireDef, WireId,
	WireInfo,
};

/// A rank-1 constraint `a * b = c` over linear combinations of wires.
///
/// Every relation the gadgets declare has degree at most two, so this is the only constraint
/// shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint<F: Field> {
	pub name: String,
	pub a: LinearCombination<F>,
	pub b: LinearCombination<F>,
	pub c: LinearCombination<F>,
}

impl<F: Field> Constraint<F> {
	pub fn wires(&self) -> impl Iterator<Item = WireId> + '_ {
		self.a.wires().chain(self.b.wires()).chain(self.c.wires())
	}
}

/// The compiled relation set of a circuit.
///
/// Holds the two things that place constraints on witness data:
/// - linear combination wires, which must equal their definition
/// - rank-1 constraints
///
/// The shape depends only on the circuit parameters, never on an instance.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSystem<F: Field> {
	pub wires: Vec<WireInfo<F>>,
	pub constraints: Vec<Constraint<F>>,
}

impl<F: Field> ConstraintSystem<F> {
	pub fn n_wires(&self) -> usize {
		self.wires.len()
	}

	pub fn is_valid_wire_id(&self, id: WireId) -> bool {
		id.index() < self.wires.len()
	}

	pub fn wire(&self, id: WireId) -> Option<&WireInfo<F>> {
		self.wires.get(id.index())
	}

	/// Human readable name of a wire, used in error messages.
	pub fn label(&self, id: WireId) -> String {
		match self.wire(id) {
			Some(info) => format!("{} ({id})", info.name),
			None => format!("<invalid> ({id})"),
		}
	}

	pub fn public_inputs(&self) -> impl Iterator<Item = &WireInfo<F>> + '_ {
		self.wires
			.iter()
			.filter(|info| info.def == WireDef::Input(Visibility::Public))
	}

	/// Committed wires that are not mentioned by any constraint.
	///
	/// Such a wire can take any value in an accepted witness. Linear combination wires that
	/// mention a committed wire do not count, since they place no restriction on it by themselves.
	pub fn unconstrained_committed_wires(&self) -> Vec<WireId> {
		let mut constrained = HashSet::new();
		for constraint in &self.constraints {
			constrained.extend(constraint.wires());
		}

		// A committed wire used by a constrained linear combination is constrained too.
		let mut changed = true;
		while changed {
			changed = false;
			for info in self.wires.iter().rev() {
				if let WireDef::LinearCombination(lc) = &info.def {
					if constrained.contains(&info.id) {
						for wire in lc.wires() {
							changed |= constrained.insert(wire);
						}
					}
				}
			}
		}

		self.wires
			.iter()
			.filter(|info| info.is_committed() && !constrained.contains(&info.id))
			.map(|info| info.id)
			.collect()
	}
}

impl<F: Field> fmt::Display for ConstraintSystem<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names = self
			.wires
			.iter()
			.map(|info| info.name.clone())
			.collect::<Vec<_>>();

		writeln!(f, "ConstraintSystem {{")?;
		for info in &self.wires {
			let index = info.id.index();
			let name = &info.name;
			match &info.def {
				WireDef::Input(Visibility::Public) => writeln!(f, "    {index:04} PUBLIC {name}")?,
				WireDef::Input(Visibility::Private) => {
					writeln!(f, "    {index:04} PRIVATE {name}")?
				}
				WireDef::Committed => writeln!(f, "    {index:04} COMMITTED {name}")?,
				WireDef::LinearCombination(lc) => {
					let lc = LinearCombinationNamed(lc, &names);
					writeln!(f, "    {index:04} LINEAR {name} = {lc}")?
				}
			}
		}
		for constraint in &self.constraints {
			let a = LinearCombinationNamed(&constraint.a, &names);
			let b = LinearCombinationNamed(&constraint.b, &names);
			let c = LinearCombinationNamed(&constraint.c, &names);
			writeln!(f, "    R1CS {}: ({a}) * ({b}) = {c}", constraint.name)?;
		}
		writeln!(f, "}}")
	}
}
