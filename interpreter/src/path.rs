//! Environment addressing by path atoms.
//!
//! Bits of the path are consumed from the least significant bit of the last
//! byte upward: `0` takes `first`, `1` takes `rest`. The most significant set
//! bit terminates the path, so `1` is the environment itself, `2` its first
//! and `3` its rest.

use clvm_core::{EvalError, Node};
use clvm_gasometer::costs::{
	PATH_LOOKUP_BASE_COST, PATH_LOOKUP_COST_PER_LEG, PATH_LOOKUP_COST_PER_ZERO_BYTE,
};

use crate::eval::{Reduction, Response};

/// Mask of the most significant set bit of `byte`.
fn msb_mask(byte: u8) -> u16 {
	let mut b = u16::from(byte);
	b |= b >> 1;
	b |= b >> 2;
	b |= b >> 4;
	(b + 1) >> 1
}

/// Resolve `path` against `env`. Empty and all-zero paths select the whole
/// environment.
pub fn traverse_path(path: &[u8], env: &Node) -> Response {
	let mut cost = PATH_LOOKUP_BASE_COST + PATH_LOOKUP_COST_PER_LEG;

	let end_byte_cursor = path.iter().take_while(|b| **b == 0).count();
	cost += end_byte_cursor as u64 * PATH_LOOKUP_COST_PER_ZERO_BYTE;
	if end_byte_cursor == path.len() {
		return Ok(Reduction(cost, env.clone()));
	}

	let end_bitmask = msb_mask(path[end_byte_cursor]);
	let mut byte_cursor = path.len() - 1;
	let mut bitmask: u16 = 0x01;
	let mut node = env;
	while byte_cursor > end_byte_cursor || bitmask < end_bitmask {
		let (first, rest) = node
			.as_pair()
			.ok_or_else(|| EvalError::new("path into atom", node))?;
		node = if u16::from(path[byte_cursor]) & bitmask != 0 {
			rest
		} else {
			first
		};
		cost += PATH_LOOKUP_COST_PER_LEG;
		bitmask <<= 1;
		if bitmask == 0x100 {
			byte_cursor -= 1;
			bitmask = 0x01;
		}
	}
	Ok(Reduction(cost, node.clone()))
}
