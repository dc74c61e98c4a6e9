use clvm_core::number::limbs_for_int;
use clvm_core::{EvalError, Node};
use clvm_gasometer::costs::*;
use num_bigint::{BigInt, Sign};
use num_traits::One;

use super::{int_arg, int_args_exact, new_int, Response};

const MAX_SHIFT: i64 = 65535;

fn shift_amount(name: &str, args: &Node, v: &BigInt, len: usize) -> Result<i64, EvalError> {
	if len > 4 {
		let arg = args.rest().and_then(|rest| rest.first()).unwrap_or(args);
		return Err(EvalError::new(
			format!("{} requires int32 args (with no leading zeros)", name),
			arg,
		));
	}
	match i64::try_from(v) {
		Ok(shift) if shift.abs() <= MAX_SHIFT => Ok(shift),
		_ => Err(EvalError::new("shift too large", &Node::from(v))),
	}
}

fn shift(v: BigInt, amount: i64) -> BigInt {
	if amount >= 0 {
		v << amount as usize
	} else {
		v >> amount.unsigned_abs() as usize
	}
}

/// `ash`: arithmetic shift, left for positive amounts. Right shifts round
/// toward negative infinity.
pub fn eval_ash(args: &Node) -> Response {
	let [(i0, l0), (i1, l1)] = int_args_exact::<2>("ash", args)?;
	let amount = shift_amount("ash", args, &i1, l1)?;
	let r = shift(i0, amount);
	let cost = ASHIFT_BASE_COST + (l0 as u64 + limbs_for_int(&r)) * ASHIFT_COST_PER_BYTE;
	new_int(cost, &r)
}

/// `lsh`: logical shift of the first argument read as unsigned.
pub fn eval_lsh(args: &Node) -> Response {
	let [(i0, l0), (i1, l1)] = int_args_exact::<2>("lsh", args)?;
	let amount = shift_amount("lsh", args, &i1, l1)?;
	let unsigned = if i0.sign() == Sign::Minus {
		i0 + (BigInt::one() << (8 * l0))
	} else {
		i0
	};
	let r = shift(unsigned, amount);
	let cost = LSHIFT_BASE_COST + (l0 as u64 + limbs_for_int(&r)) * LSHIFT_COST_PER_BYTE;
	new_int(cost, &r)
}

fn binop_reduction(
	name: &str,
	initial: BigInt,
	args: &Node,
	f: fn(BigInt, &BigInt) -> BigInt,
) -> Response {
	let mut total = initial;
	let mut count = 0;
	let mut bytes = 0;
	for arg in args.iter() {
		let (v, len) = int_arg(name, arg)?;
		total = f(total, &v);
		count += 1;
		bytes += len as u64;
	}
	let cost = linear_cost(LOG_BASE_COST, LOG_COST_PER_ARG, LOG_COST_PER_BYTE, count, bytes);
	new_int(cost, &total)
}

/// `logand`
pub fn eval_logand(args: &Node) -> Response {
	binop_reduction("logand", BigInt::from(-1), args, |a, b| a & b)
}

/// `logior`
pub fn eval_logior(args: &Node) -> Response {
	binop_reduction("logior", BigInt::from(0), args, |a, b| a | b)
}

/// `logxor`
pub fn eval_logxor(args: &Node) -> Response {
	binop_reduction("logxor", BigInt::from(0), args, |a, b| a ^ b)
}

/// `lognot`
pub fn eval_lognot(args: &Node) -> Response {
	let [(i0, l0)] = int_args_exact::<1>("lognot", args)?;
	let cost = LOGNOT_BASE_COST + l0 as u64 * LOGNOT_COST_PER_BYTE;
	new_int(cost, &(-i0 - 1))
}

#[cfg(test)]
mod tests {
	use super::super::tests::{ints, list};
	use super::super::Reduction;
	use super::*;

	#[test]
	fn arithmetic_shift() {
		assert_eq!(eval_ash(&ints(&[1, 8])).unwrap(), Reduction(625, Node::from(256)));
		assert_eq!(eval_ash(&ints(&[-1, -1])).unwrap().1, Node::from(-1));
		assert_eq!(eval_ash(&ints(&[-5, -1])).unwrap().1, Node::from(-3));
		assert_eq!(eval_ash(&ints(&[5, -1])).unwrap().1, Node::from(2));
	}

	#[test]
	fn logical_shift_is_unsigned() {
		let args = list(&[Node::from([0xff]), Node::from(1)]);
		assert_eq!(eval_lsh(&args).unwrap(), Reduction(306, Node::from(510)));
		let args = list(&[Node::from([0x80]), Node::from(-1)]);
		assert_eq!(eval_lsh(&args).unwrap().1, Node::from(64));
	}

	#[test]
	fn shift_limits() {
		let err = eval_ash(&ints(&[1, 65536])).unwrap_err();
		assert_eq!(err.message(), "shift too large");
		let err = eval_lsh(&ints(&[1, -65536])).unwrap_err();
		assert_eq!(err.message(), "shift too large");
		assert!(eval_ash(&ints(&[1, 65535])).is_ok());

		let args = list(&[Node::from(1), Node::from([0, 0, 0, 0, 1])]);
		let err = eval_ash(&args).unwrap_err();
		assert_eq!(err.message(), "ash requires int32 args (with no leading zeros)");
		assert_eq!(err.node(), Some(&Node::from([0, 0, 0, 0, 1])));
	}

	#[test]
	fn bitwise_reductions() {
		assert_eq!(eval_logand(&Node::nil()).unwrap(), Reduction(110, Node::from(-1)));
		assert_eq!(eval_logior(&Node::nil()).unwrap(), Reduction(100, Node::nil()));
		assert_eq!(eval_logand(&ints(&[12, 10])).unwrap(), Reduction(644, Node::from(8)));
		assert_eq!(eval_logior(&ints(&[12, 10])).unwrap().1, Node::from(14));
		assert_eq!(eval_logxor(&ints(&[12, 10])).unwrap().1, Node::from(6));
		assert_eq!(eval_logand(&ints(&[-1, 5])).unwrap().1, Node::from(5));
		assert_eq!(eval_logior(&ints(&[-128, 1])).unwrap().1, Node::from(-127));
	}

	#[test]
	fn lognot() {
		assert_eq!(eval_lognot(&ints(&[5])).unwrap(), Reduction(344, Node::from(-6)));
		assert_eq!(eval_lognot(&ints(&[-1])).unwrap().1, Node::nil());
		let err = eval_lognot(&ints(&[1, 2])).unwrap_err();
		assert_eq!(err.message(), "lognot takes exactly 1 argument");
	}
}
