// Copyright 2025 zkfloat developers

use std::{collections::BTreeMap, fmt};

use getset::{CopyGetters, Getters};
use zkfloat_field::Field;

use super::ConstraintSystem;
use crate::{Visibility, WireDef};

/// Size statistics of a compiled constraint system.
#[derive(Debug, Clone, CopyGetters, Getters)]
pub struct ConstraintSystemStat {
	#[getset(get_copy = "pub")]
	n_public_inputs: usize,
	#[getset(get_copy = "pub")]
	n_private_inputs: usize,
	#[getset(get_copy = "pub")]
	n_committed: usize,
	#[getset(get_copy = "pub")]
	n_linear_combinations: usize,
	#[getset(get_copy = "pub")]
	n_constraints: usize,
	/// Number of constraints under each namespace prefix, truncated to the requested depth.
	#[getset(get = "pub")]
	per_namespace: BTreeMap<String, usize>,
}

impl ConstraintSystemStat {
	/// Collects statistics, grouping constraints by the first `depth` components of their
	/// namespace path.
	pub fn new<F: Field>(constraint_system: &ConstraintSystem<F>, depth: usize) -> Self {
		let mut stat = Self {
			n_public_inputs: 0,
			n_private_inputs: 0,
			n_committed: 0,
			n_linear_combinations: 0,
			n_constraints: constraint_system.constraints.len(),
			per_namespace: BTreeMap::new(),
		};

		for info in &constraint_system.wires {
			match info.def {
				WireDef::Input(Visibility::Public) => stat.n_public_inputs += 1,
				WireDef::Input(Visibility::Private) => stat.n_private_inputs += 1,
				WireDef::Committed => stat.n_committed += 1,
				WireDef::LinearCombination(_) => stat.n_linear_combinations += 1,
			}
		}

		for constraint in &constraint_system.constraints {
			*stat
				.per_namespace
				.entry(namespace_prefix(&constraint.name, depth))
				.or_default() += 1;
		}

		stat
	}
}

fn namespace_prefix(name: &str, depth: usize) -> String {
	let mut path = name.split("::").collect::<Vec<_>>();
	// The last component is the constraint's own name.
	path.pop();
	path.truncate(depth);
	if path.is_empty() {
		"<root>".to_string()
	} else {
		path.join("::")
	}
}

impl fmt::Display for ConstraintSystemStat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "public inputs:        {}", self.n_public_inputs)?;
		writeln!(f, "private inputs:       {}", self.n_private_inputs)?;
		writeln!(f, "committed wires:      {}", self.n_committed)?;
		writeln!(f, "linear combinations:  {}", self.n_linear_combinations)?;
		writeln!(f, "constraints:          {}", self.n_constraints)?;
		for (namespace, count) in &self.per_namespace {
			writeln!(f, "  {namespace}: {count}")?;
		}
		Ok(())
	}
}
