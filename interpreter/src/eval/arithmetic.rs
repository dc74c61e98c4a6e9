//! Signed big integer arithmetic. Division rounds toward negative infinity.

use clvm_core::number::{limbs_for_int, number_to_bytes};
use clvm_core::{EvalError, Node};
use clvm_gasometer::costs::*;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::{int_arg, int_args_exact, new_int, Reduction, Response};

/// `+`
pub fn eval_add(args: &Node) -> Response {
	let mut total = BigInt::zero();
	let mut count = 0;
	let mut bytes = 0;
	for arg in args.iter() {
		let (v, len) = int_arg("+", arg)?;
		total += v;
		count += 1;
		bytes += len as u64;
	}
	let cost = linear_cost(
		ARITH_BASE_COST,
		ARITH_COST_PER_ARG,
		ARITH_COST_PER_BYTE,
		count,
		bytes,
	);
	new_int(cost, &total)
}

/// `-`: the first argument minus all the others.
pub fn eval_subtract(args: &Node) -> Response {
	let mut total = BigInt::zero();
	let mut count = 0;
	let mut bytes = 0;
	for arg in args.iter() {
		let (v, len) = int_arg("-", arg)?;
		if count == 0 {
			total += v;
		} else {
			total -= v;
		}
		count += 1;
		bytes += len as u64;
	}
	let cost = linear_cost(
		ARITH_BASE_COST,
		ARITH_COST_PER_ARG,
		ARITH_COST_PER_BYTE,
		count,
		bytes,
	);
	new_int(cost, &total)
}

/// `*`
pub fn eval_multiply(args: &Node) -> Response {
	let mut cost = MUL_BASE_COST;
	let mut operands = args.iter();
	let Some(first) = operands.next() else {
		return new_int(cost, &BigInt::one());
	};

	let (mut v, len) = int_arg("*", first)?;
	let mut vs = len as u64;
	for arg in operands {
		let (r, rs) = int_arg("*", arg)?;
		cost = cost.saturating_add(mul_step_cost(vs, rs as u64));
		v *= r;
		vs = limbs_for_int(&v);
	}
	new_int(cost, &v)
}

/// `/`
pub fn eval_div(args: &Node) -> Response {
	let [(i0, l0), (i1, l1)] = int_args_exact::<2>("/", args)?;
	if i1.is_zero() {
		return Err(EvalError::arithmetic("div with 0", &Node::from(&i0)));
	}
	let cost = DIV_BASE_COST + (l0 + l1) as u64 * DIV_COST_PER_BYTE;
	new_int(cost, &i0.div_floor(&i1))
}

/// `divmod`: the pair `(quotient . remainder)`.
pub fn eval_divmod(args: &Node) -> Response {
	let [(i0, l0), (i1, l1)] = int_args_exact::<2>("divmod", args)?;
	if i1.is_zero() {
		return Err(EvalError::arithmetic("divmod with 0", &Node::from(&i0)));
	}
	let (q, r) = i0.div_mod_floor(&i1);
	let q = number_to_bytes(&q);
	let r = number_to_bytes(&r);
	let cost = DIVMOD_BASE_COST
		+ (l0 + l1) as u64 * DIVMOD_COST_PER_BYTE
		+ malloc_cost(q.len())
		+ malloc_cost(r.len());
	Ok(Reduction(cost, Node::pair(Node::atom(q), Node::atom(r))))
}

/// `>`
pub fn eval_gr(args: &Node) -> Response {
	let [(i0, l0), (i1, l1)] = int_args_exact::<2>(">", args)?;
	let cost = GR_BASE_COST + (l0 + l1) as u64 * GR_COST_PER_BYTE;
	Ok(Reduction(cost, Node::from_bool(i0 > i1)))
}

#[cfg(test)]
mod tests {
	use super::super::tests::{ints, list};
	use super::*;

	fn value(r: Response) -> BigInt {
		r.unwrap().1.as_bigint().unwrap()
	}

	#[test]
	fn add_charges_per_arg_and_byte() {
		let args = list(&[Node::from(25), Node::from(175)]);
		let Reduction(cost, node) = eval_add(&args).unwrap();
		assert_eq!(node.atom_bytes().unwrap(), &[0x00, 0xc8]);
		assert_eq!(cost, 99 + 2 * 320 + 3 * 3 + 2 * 10);
		assert_eq!(eval_add(&Node::nil()).unwrap(), Reduction(99, Node::nil()));

		let err = eval_add(&list(&[Node::pair(Node::nil(), Node::nil())])).unwrap_err();
		assert_eq!(err.message(), "+ requires int args");
	}

	#[test]
	fn subtract() {
		assert_eq!(eval_subtract(&ints(&[10, 3, 2])).unwrap(), Reduction(1078, Node::from(5)));
		assert_eq!(value(eval_subtract(&ints(&[1]))), BigInt::from(1));
		assert_eq!(value(eval_subtract(&ints(&[1, 2]))), BigInt::from(-1));
		assert_eq!(eval_subtract(&Node::nil()).unwrap(), Reduction(99, Node::nil()));
	}

	#[test]
	fn multiply_tracks_product_size() {
		let Reduction(cost, node) = eval_multiply(&ints(&[2, 3, 4])).unwrap();
		assert_eq!(node, Node::from(24));
		assert_eq!(cost, 92 + 2 * (885 + 12) + 10);
		assert_eq!(eval_multiply(&Node::nil()).unwrap(), Reduction(102, Node::one()));
		assert_eq!(value(eval_multiply(&ints(&[-3, 7]))), BigInt::from(-21));
	}

	#[test]
	fn division_floors() {
		assert_eq!(value(eval_div(&ints(&[-8, 5]))), BigInt::from(-2));
		assert_eq!(value(eval_div(&ints(&[8, -5]))), BigInt::from(-2));
		assert_eq!(value(eval_div(&ints(&[-8, -5]))), BigInt::from(1));
		assert_eq!(value(eval_div(&ints(&[-1, 5]))), BigInt::from(-1));
		assert_eq!(eval_div(&ints(&[-8, 5])).unwrap().0, 988 + 8 + 10);

		let Reduction(cost, node) = eval_divmod(&ints(&[-8, 5])).unwrap();
		assert_eq!(node, Node::pair(Node::from(-2), Node::from(2)));
		assert_eq!(cost, 1116 + 12 + 10 + 10);
	}

	#[test]
	fn floor_division_laws() {
		for a in [-100i64, -17, -8, -1, 0, 1, 8, 17, 100, 1 << 40] {
			for b in [-7i64, -5, -1, 1, 3, 5, 256] {
				let Reduction(_, node) = eval_divmod(&ints(&[a, b])).unwrap();
				let (q, r) = node.as_pair().unwrap();
				let q = q.as_bigint().unwrap();
				let r = r.as_bigint().unwrap();
				assert_eq!(value(eval_div(&ints(&[a, b]))), q);
				let b = BigInt::from(b);
				assert_eq!(&b * &q + &r, BigInt::from(a));
				assert!(r.is_zero() || (r < BigInt::zero()) == (b < BigInt::zero()));
				assert!(r.magnitude() < b.magnitude());
			}
		}
	}

	#[test]
	fn division_by_zero() {
		let err = eval_div(&ints(&[1, 0])).unwrap_err();
		assert!(matches!(err, EvalError::Arithmetic { .. }));
		assert_eq!(err.message(), "div with 0");
		let err = eval_divmod(&ints(&[1, 0])).unwrap_err();
		assert_eq!(err.message(), "divmod with 0");
		let err = eval_div(&ints(&[1])).unwrap_err();
		assert_eq!(err.message(), "/ takes exactly 2 arguments");
	}

	#[test]
	fn greater_than_is_signed() {
		assert_eq!(eval_gr(&ints(&[2, 1])).unwrap(), Reduction(498 + 4, Node::one()));
		assert_eq!(eval_gr(&ints(&[-1, 1])).unwrap().1, Node::nil());
		// 0x80 reads as -128
		let args = list(&[Node::from([0x80]), Node::from(0)]);
		assert_eq!(eval_gr(&args).unwrap().1, Node::nil());
	}
}
