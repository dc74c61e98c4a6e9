//! Data layer of the cost-metered tree interpreter: the [`Node`] tree, its
//! canonical binary encoding, and the integer view of atoms.

#![forbid(unsafe_code)]

mod error;
mod node;
pub mod number;
pub mod serde;

pub use crate::error::{EvalError, SerializationError};
pub use crate::node::{ListIter, Node, SExp};
pub use crate::serde::{
	node_from_bytes, node_from_stream, node_to_bytes, node_to_stream, serialized_length,
	split_serialized,
};

/// Abstract resource unit charged by every primitive.
pub type Cost = u64;
