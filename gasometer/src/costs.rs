//! Cost constants. These are protocol values: two implementations agree on a
//! program's cost only if every number here matches.

use clvm_core::Cost;

pub const IF_COST: Cost = 33;
pub const CONS_COST: Cost = 50;
pub const FIRST_COST: Cost = 30;
pub const REST_COST: Cost = 30;
pub const LISTP_COST: Cost = 19;

/// Charged per byte of every freshly allocated atom result.
pub const MALLOC_COST_PER_BYTE: Cost = 10;

pub const ARITH_BASE_COST: Cost = 99;
pub const ARITH_COST_PER_BYTE: Cost = 3;
pub const ARITH_COST_PER_ARG: Cost = 320;

pub const LOG_BASE_COST: Cost = 100;
pub const LOG_COST_PER_BYTE: Cost = 3;
pub const LOG_COST_PER_ARG: Cost = 264;

pub const GRS_BASE_COST: Cost = 117;
pub const GRS_COST_PER_BYTE: Cost = 1;

pub const EQ_BASE_COST: Cost = 117;
pub const EQ_COST_PER_BYTE: Cost = 1;

pub const GR_BASE_COST: Cost = 498;
pub const GR_COST_PER_BYTE: Cost = 2;

pub const DIVMOD_BASE_COST: Cost = 1116;
pub const DIVMOD_COST_PER_BYTE: Cost = 6;

pub const DIV_BASE_COST: Cost = 988;
pub const DIV_COST_PER_BYTE: Cost = 4;

pub const SHA256_BASE_COST: Cost = 87;
pub const SHA256_COST_PER_ARG: Cost = 134;
pub const SHA256_COST_PER_BYTE: Cost = 2;

pub const POINT_ADD_BASE_COST: Cost = 101_094;
pub const POINT_ADD_COST_PER_ARG: Cost = 1_343_980;

pub const PUBKEY_BASE_COST: Cost = 1_325_730;
pub const PUBKEY_COST_PER_BYTE: Cost = 38;

pub const MUL_BASE_COST: Cost = 92;
pub const MUL_COST_PER_OP: Cost = 885;
pub const MUL_LINEAR_COST_PER_BYTE: Cost = 6;
pub const MUL_SQUARE_COST_PER_BYTE_DIVIDER: Cost = 128;

pub const STRLEN_BASE_COST: Cost = 173;
pub const STRLEN_COST_PER_BYTE: Cost = 1;

pub const PATH_LOOKUP_BASE_COST: Cost = 40;
pub const PATH_LOOKUP_COST_PER_LEG: Cost = 4;
pub const PATH_LOOKUP_COST_PER_ZERO_BYTE: Cost = 4;

pub const CONCAT_BASE_COST: Cost = 142;
pub const CONCAT_COST_PER_ARG: Cost = 135;
pub const CONCAT_COST_PER_BYTE: Cost = 3;

pub const BOOL_BASE_COST: Cost = 200;
pub const BOOL_COST_PER_ARG: Cost = 300;

pub const ASHIFT_BASE_COST: Cost = 596;
pub const ASHIFT_COST_PER_BYTE: Cost = 3;

pub const LSHIFT_BASE_COST: Cost = 277;
pub const LSHIFT_COST_PER_BYTE: Cost = 3;

pub const LOGNOT_BASE_COST: Cost = 331;
pub const LOGNOT_COST_PER_BYTE: Cost = 3;

pub const APPLY_COST: Cost = 90;
pub const QUOTE_COST: Cost = 20;

/// Charged by the evaluator for scheduling an operator form.
pub const EVAL_OP_COST: Cost = 1;

/// Flat cost of `substr`.
pub const SUBSTR_COST: Cost = 1;

/// Flat cost of an unknown opcode whose cost shape is "constant".
pub const UNKNOWN_OP_CONSTANT_COST: Cost = 1;

/// Cost limit of a whole block of spends on the main network.
pub const MAX_BLOCK_COST: Cost = 11_000_000_000;

/// `base + per_arg * args + per_byte * bytes`, the shape shared by most
/// variadic primitives.
pub fn linear_cost(base: Cost, per_arg: Cost, per_byte: Cost, args: u64, bytes: u64) -> Cost {
	base.saturating_add(per_arg.saturating_mul(args))
		.saturating_add(per_byte.saturating_mul(bytes))
}

/// Incremental cost of multiplying a running product of `vs` bytes by an
/// operand of `rs` bytes.
pub fn mul_step_cost(vs: u64, rs: u64) -> Cost {
	MUL_COST_PER_OP
		.saturating_add(rs.saturating_add(vs).saturating_mul(MUL_LINEAR_COST_PER_BYTE))
		.saturating_add(rs.saturating_mul(vs) / MUL_SQUARE_COST_PER_BYTE_DIVIDER)
}

/// Surcharge for allocating an atom of `len` bytes.
pub fn malloc_cost(len: usize) -> Cost {
	(len as Cost).saturating_mul(MALLOC_COST_PER_BYTE)
}
