use clvm_core::{EvalError, Node};
use clvm_gasometer::costs::*;
use num_bigint::BigInt;

use super::{args_exact, atom_arg, i32_arg, new_atom, new_int, Reduction, Response};

/// `strlen`
pub fn eval_strlen(args: &Node) -> Response {
	let [a0] = args_exact::<1>("strlen", args)?;
	let len = atom_arg("strlen", a0)?.len();
	let cost = STRLEN_BASE_COST + len as u64 * STRLEN_COST_PER_BYTE;
	new_int(cost, &BigInt::from(len))
}

/// `substr`: bytes `start..end` of the first argument, `end` defaulting to
/// its length.
pub fn eval_substr(args: &Node) -> Response {
	let items: Vec<&Node> = args.iter().collect();
	if items.len() != 2 && items.len() != 3 {
		return Err(EvalError::new("substr takes exactly 2 or 3 arguments", args));
	}
	let s0 = atom_arg("substr", items[0])?;
	let start = i32_arg("substr", items[1])?;
	let end = match items.get(2) {
		Some(arg) => i32_arg("substr", arg)?,
		None => s0.len() as i64,
	};
	if start < 0 || end < start || end > s0.len() as i64 {
		return Err(EvalError::new("invalid indices for substr", args));
	}
	let slice = &s0[start as usize..end as usize];
	Ok(Reduction(SUBSTR_COST, Node::atom(slice)))
}

/// `concat`
pub fn eval_concat(args: &Node) -> Response {
	let mut out = Vec::new();
	let mut count = 0;
	for arg in args.iter() {
		out.extend_from_slice(atom_arg("concat", arg)?);
		count += 1;
	}
	let cost = linear_cost(
		CONCAT_BASE_COST,
		CONCAT_COST_PER_ARG,
		CONCAT_COST_PER_BYTE,
		count,
		out.len() as u64,
	);
	new_atom(cost, out)
}

/// `>s`: byte-wise lexicographic comparison.
pub fn eval_gr_bytes(args: &Node) -> Response {
	let [a0, a1] = args_exact::<2>(">s", args)?;
	let b0 = atom_arg(">s", a0)?;
	let b1 = atom_arg(">s", a1)?;
	let cost = GRS_BASE_COST + (b0.len() + b1.len()) as u64 * GRS_COST_PER_BYTE;
	Ok(Reduction(cost, Node::from_bool(b0 > b1)))
}
