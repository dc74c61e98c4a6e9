//! Cost-metered interpreter for programs written as binary trees of byte
//! strings.
//!
//! Programs and their environments are [`Node`] trees, exchanged in the
//! canonical binary encoding of [`serde`]. Evaluation charges every step
//! against an optional budget and always reports the total cost next to the
//! result.

#![forbid(unsafe_code)]

pub use clvm_bls as bls;
pub use clvm_core::*;
pub use clvm_gasometer as gasometer;
pub use clvm_interpreter::*;

mod config;
mod error;

pub use crate::config::Config;
pub use crate::error::Error;

/// Evaluate `program` against `env` under the limits of `config`.
pub fn run_with_config(config: &Config, program: &Node, env: &Node) -> Response {
	run_program(config.table(), program, env, config.max_cost)
}

/// Decode a serialized program and environment, then evaluate.
///
/// Bytes after the first complete node of either input are ignored.
pub fn run_serialized(config: &Config, program: &[u8], env: &[u8]) -> Result<Reduction, Error> {
	let program = node_from_bytes(program)?;
	let env = node_from_bytes(env)?;
	let Reduction(cost, result) = run_with_config(config, &program, &env)?;
	log::debug!(target: "clvm", "serialized run finished, cost {}", cost);
	Ok(Reduction(cost, result))
}
