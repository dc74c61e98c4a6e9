use std::borrow::Cow;
use std::fmt;
use std::io;

use crate::{Cost, Node};

/// Failure while reading or writing the canonical binary encoding.
#[derive(Debug)]
pub enum SerializationError {
	/// Input ended early or is otherwise malformed.
	BadEncoding,
	/// An atom length is at or above the 0x400000000 byte ceiling.
	TooLarge,
	/// The underlying writer failed.
	Io(io::Error),
}

impl From<io::Error> for SerializationError {
	fn from(e: io::Error) -> Self {
		match e.kind() {
			io::ErrorKind::UnexpectedEof => Self::BadEncoding,
			_ => Self::Io(e),
		}
	}
}

impl fmt::Display for SerializationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::BadEncoding => write!(f, "bad encoding"),
			Self::TooLarge => write!(f, "blob too large"),
			Self::Io(e) => write!(f, "io error: {}", e),
		}
	}
}

impl std::error::Error for SerializationError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(e) => Some(e),
			_ => None,
		}
	}
}

/// Evaluation failure. Every variant is terminal for the enclosing run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EvalError {
	/// A primitive or the evaluator rejected its input. The message names the
	/// operator where one is involved; `node` is the offending value.
	Eval {
		message: Cow<'static, str>,
		node: Node,
	},
	/// Opcode is empty, too long, or starts with the reserved `ffff` prefix.
	ReservedOperator {
		message: Cow<'static, str>,
		operator: Node,
	},
	/// Accumulated cost went past the caller's limit.
	CostExceeded { max_cost: Cost },
	/// Division or modulo by zero.
	Arithmetic {
		message: Cow<'static, str>,
		node: Node,
	},
}

impl EvalError {
	/// Generic evaluation error with a static or formatted message.
	pub fn new<M: Into<Cow<'static, str>>>(message: M, node: &Node) -> Self {
		Self::Eval {
			message: message.into(),
			node: node.clone(),
		}
	}

	pub fn reserved<M: Into<Cow<'static, str>>>(message: M, operator: &Node) -> Self {
		Self::ReservedOperator {
			message: message.into(),
			operator: operator.clone(),
		}
	}

	pub fn arithmetic<M: Into<Cow<'static, str>>>(message: M, node: &Node) -> Self {
		Self::Arithmetic {
			message: message.into(),
			node: node.clone(),
		}
	}

	/// Human readable reason, without the attached node.
	pub fn message(&self) -> Cow<'_, str> {
		match self {
			Self::Eval { message, .. }
			| Self::ReservedOperator { message, .. }
			| Self::Arithmetic { message, .. } => Cow::Borrowed(message.as_ref()),
			Self::CostExceeded { .. } => Cow::Borrowed("cost exceeded"),
		}
	}

	/// The node the error is about, if any.
	pub fn node(&self) -> Option<&Node> {
		match self {
			Self::Eval { node, .. } | Self::Arithmetic { node, .. } => Some(node),
			Self::ReservedOperator { operator, .. } => Some(operator),
			Self::CostExceeded { .. } => None,
		}
	}
}

impl fmt::Display for EvalError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CostExceeded { max_cost } => write!(f, "cost exceeded (max cost {})", max_cost),
			_ => match self.node() {
				Some(node) => write!(f, "{}: {:?}", self.message(), node),
				None => write!(f, "{}", self.message()),
			},
		}
	}
}

impl std::error::Error for EvalError {}
