use clvm_bls::{G1Point, GROUP_ORDER};
use clvm_core::{EvalError, Node};
use clvm_gasometer::costs::*;
use lazy_static::lazy_static;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use sha2::{Digest, Sha256};

use super::{atom_arg, int_args_exact, new_atom, Reduction, Response};

lazy_static! {
	static ref ORDER: BigInt = BigInt::from_bytes_be(Sign::Plus, &GROUP_ORDER);
}

/// `sha256` of the concatenation of all arguments.
pub fn eval_sha256(args: &Node) -> Response {
	let mut hasher = Sha256::new();
	let mut count = 0;
	let mut bytes = 0;
	for arg in args.iter() {
		let atom = atom_arg("sha256", arg)?;
		hasher.update(atom);
		count += 1;
		bytes += atom.len() as u64;
	}
	let cost = linear_cost(
		SHA256_BASE_COST,
		SHA256_COST_PER_ARG,
		SHA256_COST_PER_BYTE,
		count,
		bytes,
	);
	Ok(Reduction(cost, Node::atom(hasher.finalize().to_vec())))
}

/// `point_add`: sum of compressed G1 points.
pub fn eval_point_add(args: &Node) -> Response {
	let bls = clvm_bls::loaded()?;
	let mut cost = POINT_ADD_BASE_COST;
	let mut total = G1Point::identity();
	for arg in args.iter() {
		let bytes = atom_arg("point_add", arg)?;
		total += bls.point_from_bytes(bytes).map_err(|e| {
			EvalError::new(format!("point_add expects blob, got {:?}: {}", arg, e), args)
		})?;
		cost += POINT_ADD_COST_PER_ARG;
	}
	new_atom(cost, bls.point_to_bytes(&total)?)
}

/// `pubkey_for_exp`: the generator times the argument, reduced modulo the
/// group order.
pub fn eval_pubkey_for_exp(args: &Node) -> Response {
	let [(i0, l0)] = int_args_exact::<1>("pubkey_for_exp", args)?;
	let bls = clvm_bls::loaded()?;
	let (_, exponent) = i0.mod_floor(&ORDER).to_bytes_be();
	let point = bls.g1_from_exponent(&exponent);
	let cost = PUBKEY_BASE_COST + l0 as u64 * PUBKEY_COST_PER_BYTE;
	new_atom(cost, bls.point_to_bytes(&point)?)
}
