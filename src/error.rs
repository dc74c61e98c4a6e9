use core::fmt;

use clvm_core::{EvalError, SerializationError};

/// Failure of a serialized run: either an input did not decode, or evaluation
/// failed.
#[derive(Debug)]
pub enum Error {
	Serialization(SerializationError),
	Eval(EvalError),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Serialization(e) => write!(f, "cannot decode input: {}", e),
			Self::Eval(e) => write!(f, "{}", e),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Serialization(e) => Some(e),
			Self::Eval(e) => Some(e),
		}
	}
}

impl From<SerializationError> for Error {
	fn from(e: SerializationError) -> Self {
		Self::Serialization(e)
	}
}

impl From<EvalError> for Error {
	fn from(e: EvalError) -> Self {
		Self::Eval(e)
	}
}
