//! Built-in operator implementations.
//!
//! Every operator receives its evaluated argument list and returns the cost it
//! charges together with its result. Argument shape is validated before any
//! work is done.

mod arithmetic;
mod bitwise;
mod crypto;
mod misc;
mod string;
mod unknown;

pub use self::arithmetic::{
	eval_add, eval_div, eval_divmod, eval_gr, eval_multiply, eval_subtract,
};
pub use self::bitwise::{
	eval_ash, eval_logand, eval_logior, eval_lognot, eval_logxor, eval_lsh,
};
pub use self::crypto::{eval_point_add, eval_pubkey_for_exp, eval_sha256};
pub use self::misc::{
	eval_all, eval_any, eval_cons, eval_eq, eval_first, eval_if, eval_listp, eval_not, eval_raise,
	eval_rest, eval_softfork,
};
pub use self::string::{eval_concat, eval_gr_bytes, eval_strlen, eval_substr};
pub use self::unknown::{eval_unimplemented, eval_unknown};

use clvm_core::number::{number_from_bytes, number_to_bytes};
use clvm_core::{Cost, EvalError, Node};
use clvm_gasometer::costs::malloc_cost;
use num_bigint::BigInt;

/// Cost charged by a reduction and the node it produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reduction(pub Cost, pub Node);

pub type Response = Result<Reduction, EvalError>;

/// Built-in operator: evaluated arguments in, reduction out.
pub type OpFn = fn(&Node) -> Response;

/// Handler for operator atoms without a table entry. Receives the operator
/// atom and the evaluated arguments.
pub type UnknownOpFn = fn(&Node, &Node) -> Response;

fn arg_count_error(name: &str, count: usize, args: &Node) -> EvalError {
	let plural = if count == 1 { "" } else { "s" };
	EvalError::new(
		format!("{} takes exactly {} argument{}", name, count, plural),
		args,
	)
}

/// The arguments, which must number exactly `N`.
pub(crate) fn args_exact<'a, const N: usize>(
	name: &str,
	args: &'a Node,
) -> Result<[&'a Node; N], EvalError> {
	let items: Vec<&Node> = args.iter().collect();
	items
		.try_into()
		.map_err(|_| arg_count_error(name, N, args))
}

/// Bytes of an argument that must be an atom.
pub(crate) fn atom_arg<'a>(name: &str, arg: &'a Node) -> Result<&'a [u8], EvalError> {
	arg.atom_bytes()
		.ok_or_else(|| EvalError::new(format!("{} on list", name), arg))
}

/// Signed value and byte length of an integer argument.
pub(crate) fn int_arg(name: &str, arg: &Node) -> Result<(BigInt, usize), EvalError> {
	match arg.atom_bytes() {
		Some(bytes) => Ok((number_from_bytes(bytes), bytes.len())),
		None => Err(EvalError::new(format!("{} requires int args", name), arg)),
	}
}

pub(crate) fn int_args(name: &str, args: &Node) -> Result<Vec<(BigInt, usize)>, EvalError> {
	args.iter().map(|arg| int_arg(name, arg)).collect()
}

/// Integer arguments, which must number exactly `N`. Argument types are
/// checked before the count.
pub(crate) fn int_args_exact<const N: usize>(
	name: &str,
	args: &Node,
) -> Result<[(BigInt, usize); N], EvalError> {
	int_args(name, args)?
		.try_into()
		.map_err(|_| arg_count_error(name, N, args))
}

/// A signed integer argument of at most four bytes.
pub(crate) fn i32_arg(name: &str, arg: &Node) -> Result<i64, EvalError> {
	let bytes = arg
		.atom_bytes()
		.ok_or_else(|| EvalError::new(format!("{} requires int32 args", name), arg))?;
	if bytes.len() > 4 {
		return Err(EvalError::new(
			format!("{} requires int32 args (with no leading zeros)", name),
			arg,
		));
	}
	let mut v: i64 = match bytes.first() {
		Some(b) if b & 0x80 != 0 => -1,
		_ => 0,
	};
	for b in bytes {
		v = (v << 8) | i64::from(*b);
	}
	Ok(v)
}

/// Reduce to a freshly allocated atom, adding its malloc surcharge.
pub(crate) fn new_atom(cost: Cost, bytes: Vec<u8>) -> Response {
	let cost = cost.saturating_add(malloc_cost(bytes.len()));
	Ok(Reduction(cost, Node::atom(bytes)))
}

pub(crate) fn new_int(cost: Cost, v: &BigInt) -> Response {
	new_atom(cost, number_to_bytes(v))
}
