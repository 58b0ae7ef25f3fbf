// Copyright 2025 zkfloat developers

use std::fmt;

use zkfloat_field::Field;

use crate::LinearCombination;

/// Identifier for a wire in a [`crate::ConstraintSystem`].
///
/// This is essentially an index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireId(usize);

impl WireId {
	/// Create a wire ID from the position of the wire in the constraint system.
	///
	/// Largely an escape hatch and discouraged to use.
	pub const fn from_index(index: usize) -> Self {
		Self(index)
	}

	/// Returns the position of the wire in the constraint system.
	pub const fn index(&self) -> usize {
		self.0
	}

	/// Returns an invalid WireId.
	pub const fn invalid() -> Self {
		Self(usize::MAX)
	}
}

impl fmt::Display for WireId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{self:?}")
	}
}

// There is no meaningful default wire; the default is the invalid sentinel.
impl Default for WireId {
	fn default() -> Self {
		Self::invalid()
	}
}

/// Whether an input wire is revealed to the verifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
	Public,
	Private,
}

/// How the value of a wire is fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireDef<F: Field> {
	/// Supplied by the caller for each instance.
	Input(Visibility),
	/// Supplied by a gadget during witness generation, either as a hint or as the result of a
	/// product. Only the constraints mentioning the wire give its value any meaning.
	Committed,
	/// Fully determined by other wires. Validation re-evaluates the combination.
	LinearCombination(LinearCombination<F>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireInfo<F: Field> {
	pub id: WireId,
	pub name: String,
	pub def: WireDef<F>,
}

impl<F: Field> WireInfo<F> {
	pub const fn is_committed(&self) -> bool {
		matches!(self.def, WireDef::Committed)
	}
}
