//! Operator table, built-in operators and the evaluator.

#![forbid(unsafe_code)]

#[cfg(feature = "tracing")]
pub mod tracing;

#[cfg(feature = "tracing")]
macro_rules! event {
	($x:expr) => {{
		use crate::tracing::Event::*;
		$x.emit();
	}};
}

#[cfg(not(feature = "tracing"))]
macro_rules! event {
	($x:expr) => {};
}

mod etable;
pub mod eval;
mod machine;
pub mod opcode;
mod path;

pub use crate::etable::{OperatorTable, OPERATOR_LOOKUP, STRICT_OPERATOR_LOOKUP};
pub use crate::eval::{OpFn, Reduction, Response, UnknownOpFn};
pub use crate::machine::{run_program, Machine};
pub use crate::opcode::{atom_to_keyword, keyword_to_atom, Opcode};
pub use crate::path::traverse_path;
