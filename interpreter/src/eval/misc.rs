use clvm_core::{EvalError, Node};
use clvm_gasometer::costs::*;
use num_bigint::BigInt;

use super::{args_exact, atom_arg, Reduction, Response};

/// `i`
pub fn eval_if(args: &Node) -> Response {
	let [cond, then, otherwise] = args_exact::<3>("i", args)?;
	let chosen = if cond.nullp() { otherwise } else { then };
	Ok(Reduction(IF_COST, chosen.clone()))
}

/// `c`
pub fn eval_cons(args: &Node) -> Response {
	let [first, rest] = args_exact::<2>("c", args)?;
	Ok(Reduction(CONS_COST, Node::pair(first.clone(), rest.clone())))
}

/// `f`
pub fn eval_first(args: &Node) -> Response {
	let [list] = args_exact::<1>("f", args)?;
	Ok(Reduction(FIRST_COST, list.first()?.clone()))
}

/// `r`
pub fn eval_rest(args: &Node) -> Response {
	let [list] = args_exact::<1>("r", args)?;
	Ok(Reduction(REST_COST, list.rest()?.clone()))
}

/// `l`
pub fn eval_listp(args: &Node) -> Response {
	let [v] = args_exact::<1>("l", args)?;
	Ok(Reduction(LISTP_COST, Node::from_bool(v.is_pair())))
}

/// `x`: always fails. A lone atom argument is reported as is, anything else
/// reports the whole argument list.
pub fn eval_raise(args: &Node) -> Response {
	let mut items = args.iter();
	let node = match (items.next(), items.next()) {
		(Some(only), None) if only.is_atom() => only,
		_ => args,
	};
	Err(EvalError::new("clvm raise", node))
}

/// `=`
pub fn eval_eq(args: &Node) -> Response {
	let [a0, a1] = args_exact::<2>("=", args)?;
	let b0 = atom_arg("=", a0)?;
	let b1 = atom_arg("=", a1)?;
	let cost = EQ_BASE_COST + (b0.len() as u64 + b1.len() as u64) * EQ_COST_PER_BYTE;
	Ok(Reduction(cost, Node::from_bool(b0 == b1)))
}

/// `not`
pub fn eval_not(args: &Node) -> Response {
	let [v] = args_exact::<1>("not", args)?;
	Ok(Reduction(BOOL_BASE_COST, Node::from_bool(v.nullp())))
}

/// `any`
pub fn eval_any(args: &Node) -> Response {
	let count = args.list_len() as u64;
	let cost = BOOL_BASE_COST + count * BOOL_COST_PER_ARG;
	Ok(Reduction(cost, Node::from_bool(args.iter().any(|v| !v.nullp()))))
}

/// `all`
pub fn eval_all(args: &Node) -> Response {
	let count = args.list_len() as u64;
	let cost = BOOL_BASE_COST + count * BOOL_COST_PER_ARG;
	Ok(Reduction(cost, Node::from_bool(args.iter().all(|v| !v.nullp()))))
}

/// `softfork`: charges the cost named by its first argument and does
/// nothing else.
pub fn eval_softfork(args: &Node) -> Response {
	let first = args
		.iter()
		.next()
		.ok_or_else(|| EvalError::new("softfork takes at least 1 argument", args))?;
	let cost = first
		.as_bigint()
		.ok_or_else(|| EvalError::new("softfork requires int args", first))?;
	if cost < BigInt::from(1) {
		return Err(EvalError::new("cost must be > 0", args));
	}
	// anything past the u64 range exceeds every budget anyway
	let cost = u64::try_from(&cost).unwrap_or(u64::MAX);
	Ok(Reduction(cost, Node::nil()))
}
