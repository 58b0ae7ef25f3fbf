// Copyright 2025 zkfloat developers

use tracing::instrument;
use zkfloat_field::Field;
use zkfloat_utils::bail;

use super::{error::Error, ConstraintSystem};
use crate::{WireDef, WitnessIndex};

/// Checks that `witness` satisfies every relation of `constraint_system`.
///
/// The checks run in order: every wire is assigned, every linear combination wire equals its
/// definition, every rank-1 constraint holds. The first violation is returned.
#[instrument(skip_all, level = "debug")]
pub fn validate_witness<F: Field>(
	constraint_system: &ConstraintSystem<F>,
	witness: &WitnessIndex<'_, F>,
) -> Result<(), Error> {
	if witness.n_wires() != constraint_system.n_wires() {
		bail!(Error::WitnessSizeMismatch {
			expected: constraint_system.n_wires(),
			got: witness.n_wires(),
		});
	}

	for info in &constraint_system.wires {
		witness.get(info.id)?;
	}

	for info in &constraint_system.wires {
		if let WireDef::LinearCombination(lc) = &info.def {
			let expected = witness.eval(lc)?;
			let got = witness.get(info.id)?;
			if expected != got {
				bail!(Error::LinearCombinationMismatch {
					wire: constraint_system.label(info.id),
					expected: expected.to_string(),
					got: got.to_string(),
				});
			}
		}
	}

	for constraint in &constraint_system.constraints {
		let lhs = witness.eval(&constraint.a)? * witness.eval(&constraint.b)?;
		let rhs = witness.eval(&constraint.c)?;
		if lhs != rhs {
			bail!(Error::ConstraintNotSatisfied {
				name: constraint.name.clone(),
				lhs: lhs.to_string(),
				rhs: rhs.to_string(),
			});
		}
	}

	Ok(())
}
