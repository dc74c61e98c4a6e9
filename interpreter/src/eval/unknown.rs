//! Operators without a table entry.
//!
//! An unknown operator is a no-op returning nil, but still charges a cost
//! derived from the operator bytes. The top two bits of the last byte pick
//! the shape of the cost function and the bytes before it, read as an
//! unsigned integer plus one, multiply the result.

use clvm_core::{Cost, EvalError, Node};
use clvm_gasometer::costs::*;

use super::{Reduction, Response};

const MAX_COST_MULTIPLIER_BYTES: usize = 4;
const MAX_UNKNOWN_COST: Cost = 1 << 32;

fn arg_len(arg: &Node, message: &'static str) -> Result<u64, EvalError> {
	arg.atom_bytes()
		.map(|bytes| bytes.len() as u64)
		.ok_or_else(|| EvalError::new(message, arg))
}

/// Default handler for unknown operators.
pub fn eval_unknown(op: &Node, args: &Node) -> Response {
	let bytes = op
		.atom_bytes()
		.ok_or_else(|| EvalError::new("internal error: operator is a pair", op))?;
	if bytes.is_empty() || bytes.starts_with(&[0xff, 0xff]) {
		return Err(EvalError::reserved("reserved operator", op));
	}
	if bytes.len() > MAX_COST_MULTIPLIER_BYTES + 1 {
		return Err(EvalError::reserved("invalid operator", op));
	}

	let (last, prefix) = match bytes.split_last() {
		Some(split) => split,
		None => return Err(EvalError::reserved("reserved operator", op)),
	};
	let multiplier = prefix
		.iter()
		.fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
		+ 1;

	let cost = match (last & 0xc0) >> 6 {
		0 => UNKNOWN_OP_CONSTANT_COST,
		1 => {
			let mut count = 0;
			let mut bytes = 0;
			for arg in args.iter() {
				bytes += arg_len(arg, "unknown op requires int args")?;
				count += 1;
			}
			linear_cost(
				ARITH_BASE_COST,
				ARITH_COST_PER_ARG,
				ARITH_COST_PER_BYTE,
				count,
				bytes,
			)
		}
		2 => {
			let mut cost = MUL_BASE_COST;
			let mut operands = args.iter();
			if let Some(first) = operands.next() {
				let mut vs = arg_len(first, "unknown op requires int args")?;
				for arg in operands {
					let rs = arg_len(arg, "unknown op requires int args")?;
					cost = cost.saturating_add(mul_step_cost(vs, rs));
					// estimate of the product size
					vs = vs.saturating_add(rs);
				}
			}
			cost
		}
		_ => {
			let mut count = 0;
			let mut bytes = 0;
			for arg in args.iter() {
				bytes += arg_len(arg, "unknown op on list")?;
				count += 1;
			}
			linear_cost(
				CONCAT_BASE_COST,
				CONCAT_COST_PER_ARG,
				CONCAT_COST_PER_BYTE,
				count,
				bytes,
			)
		}
	};

	let cost = cost.saturating_mul(multiplier);
	if cost >= MAX_UNKNOWN_COST {
		return Err(EvalError::new("invalid operator", op));
	}
	Ok(Reduction(cost, Node::nil()))
}

/// Handler installed by strict tables: any unknown operator is fatal.
pub fn eval_unimplemented(op: &Node, _args: &Node) -> Response {
	Err(EvalError::new("unimplemented operator", op))
}
