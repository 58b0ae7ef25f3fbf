// Copyright 2025 zkfloat developers

use zkfloat_field::Field;
use zkfloat_utils::bail;

use crate::{ConstraintSystem, Error, LinearCombination, WireDef, WireId};

/// Assignment of values to the wires of one constraint system, for a single instance.
///
/// Wires are write-once: [`Self::set`] refuses to overwrite an assigned value.
#[derive(Debug, Clone)]
pub struct WitnessIndex<'cs, F: Field> {
	cs: &'cs ConstraintSystem<F>,
	values: Vec<Option<F>>,
}

impl<'cs, F: Field> WitnessIndex<'cs, F> {
	pub fn new(cs: &'cs ConstraintSystem<F>) -> Self {
		Self {
			cs,
			values: vec![None; cs.n_wires()],
		}
	}

	pub fn n_wires(&self) -> usize {
		self.values.len()
	}

	pub fn get(&self, id: WireId) -> Result<F, Error> {
		match self.values.get(id.index()) {
			None => Err(Error::InvalidWireId(id)),
			Some(None) => Err(Error::MissingWitness {
				wire: self.cs.label(id),
			}),
			Some(Some(value)) => Ok(*value),
		}
	}

	pub fn set(&mut self, id: WireId, value: F) -> Result<(), Error> {
		let Some(slot) = self.values.get_mut(id.index()) else {
			bail!(Error::InvalidWireId(id));
		};
		if slot.is_some() {
			bail!(Error::WireAlreadyAssigned {
				wire: self.cs.label(id),
			});
		}
		*slot = Some(value);
		Ok(())
	}

	/// Overwrites the value of a wire, returning the previous one.
	///
	/// Witness generation never needs this. It lets tests substitute a dishonest hint after
	/// honest population and check that validation rejects it.
	pub fn replace(&mut self, id: WireId, value: F) -> Result<Option<F>, Error> {
		let Some(slot) = self.values.get_mut(id.index()) else {
			bail!(Error::InvalidWireId(id));
		};
		Ok(slot.replace(value))
	}

	pub fn eval(&self, lc: &LinearCombination<F>) -> Result<F, Error> {
		lc.evaluate(|wire| self.get(wire))
	}

	/// Assigns a linear combination wire from its definition and returns the value.
	pub fn fill_linear_combination(&mut self, id: WireId) -> Result<F, Error> {
		let cs = self.cs;
		let info = cs.wire(id).ok_or(Error::InvalidWireId(id))?;
		let WireDef::LinearCombination(lc) = &info.def else {
			bail!(Error::NotALinearCombination {
				wire: cs.label(id),
			});
		};
		let value = self.eval(lc)?;
		self.set(id, value)?;
		Ok(value)
	}
}
