// Copyright 2025 zkfloat developers

/// Error thrown when a field element is read back as a machine integer.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	#[error("field element needs {bits} bits and does not fit in a {target}-bit integer")]
	ValueTooLarge { bits: usize, target: usize },
}
