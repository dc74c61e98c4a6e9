use clvm_core::Node;
use lazy_static::lazy_static;

use crate::eval::*;
use crate::opcode::Opcode;

lazy_static! {
	/// The standard table, built once per process.
	pub static ref OPERATOR_LOOKUP: OperatorTable = OperatorTable::standard();
	/// The strict table, built once per process.
	pub static ref STRICT_OPERATOR_LOOKUP: OperatorTable = OperatorTable::strict();
}

/// Dispatch table from single byte opcodes to built-in operators.
///
/// Besides the primitives it names the two opcodes the evaluator handles
/// itself (quote and apply) and the handler for operator atoms without an
/// entry.
#[derive(Clone)]
pub struct OperatorTable {
	quote: Opcode,
	apply: Opcode,
	table: [Option<OpFn>; 256],
	unknown: UnknownOpFn,
}

impl OperatorTable {
	/// A table without primitives: every operator is unknown.
	pub fn none() -> Self {
		Self {
			quote: Opcode::QUOTE,
			apply: Opcode::APPLY,
			table: [None; 256],
			unknown: eval_unknown,
		}
	}

	/// The core set: `i c f r l x =`.
	pub fn core() -> Self {
		let mut table = Self::none();

		table.set(Opcode::IF, eval_if);
		table.set(Opcode::CONS, eval_cons);
		table.set(Opcode::FIRST, eval_first);
		table.set(Opcode::REST, eval_rest);
		table.set(Opcode::LISTP, eval_listp);
		table.set(Opcode::RAISE, eval_raise);
		table.set(Opcode::EQ, eval_eq);

		table
	}

	/// Every primitive outside the core set.
	pub fn extended() -> Self {
		let mut table = Self::none();

		table.set(Opcode::GR_BYTES, eval_gr_bytes);
		table.set(Opcode::SHA256, eval_sha256);
		table.set(Opcode::SUBSTR, eval_substr);
		table.set(Opcode::STRLEN, eval_strlen);
		table.set(Opcode::CONCAT, eval_concat);

		table.set(Opcode::ADD, eval_add);
		table.set(Opcode::SUBTRACT, eval_subtract);
		table.set(Opcode::MULTIPLY, eval_multiply);
		table.set(Opcode::DIV, eval_div);
		table.set(Opcode::DIVMOD, eval_divmod);
		table.set(Opcode::GR, eval_gr);
		table.set(Opcode::ASH, eval_ash);
		table.set(Opcode::LSH, eval_lsh);

		table.set(Opcode::LOGAND, eval_logand);
		table.set(Opcode::LOGIOR, eval_logior);
		table.set(Opcode::LOGXOR, eval_logxor);
		table.set(Opcode::LOGNOT, eval_lognot);

		table.set(Opcode::POINT_ADD, eval_point_add);
		table.set(Opcode::PUBKEY_FOR_EXP, eval_pubkey_for_exp);

		table.set(Opcode::NOT, eval_not);
		table.set(Opcode::ANY, eval_any);
		table.set(Opcode::ALL, eval_all);

		table.set(Opcode::SOFTFORK, eval_softfork);

		table
	}

	/// Core and extended sets together, unknown operators charged and
	/// ignored.
	pub fn standard() -> Self {
		Self::core().merge(&Self::extended())
	}

	/// The standard set with unknown operators rejected.
	pub fn strict() -> Self {
		Self::standard().with_unknown_op_handler(eval_unimplemented)
	}

	/// Fill the opcodes `self` leaves empty from `other`. Entries already in
	/// `self` win.
	#[must_use]
	pub fn merge(mut self, other: &OperatorTable) -> Self {
		for (slot, fallback) in self.table.iter_mut().zip(other.table.iter()) {
			if slot.is_none() {
				*slot = *fallback;
			}
		}
		self
	}

	/// Install or replace the primitive for `opcode`.
	pub fn set(&mut self, opcode: Opcode, f: OpFn) {
		self.table[opcode.as_usize()] = Some(f);
	}

	pub fn remove(&mut self, opcode: Opcode) -> Option<OpFn> {
		self.table[opcode.as_usize()].take()
	}

	#[must_use]
	pub fn with_unknown_op_handler(mut self, f: UnknownOpFn) -> Self {
		self.unknown = f;
		self
	}

	#[must_use]
	pub fn with_quote(mut self, opcode: Opcode) -> Self {
		self.quote = opcode;
		self
	}

	#[must_use]
	pub fn with_apply(mut self, opcode: Opcode) -> Self {
		self.apply = opcode;
		self
	}

	pub fn quote(&self) -> Opcode {
		self.quote
	}

	pub fn apply(&self) -> Opcode {
		self.apply
	}

	/// Primitive registered for an operator atom. Only single byte atoms
	/// can have one.
	pub fn get(&self, op: &[u8]) -> Option<OpFn> {
		match op {
			[byte] => self.table[usize::from(*byte)],
			_ => None,
		}
	}

	/// Run the primitive for `operator` on `args`, falling back to the
	/// unknown operator handler.
	pub fn eval(&self, operator: &Node, args: &Node) -> Response {
		match operator.atom_bytes().and_then(|op| self.get(op)) {
			Some(f) => f(args),
			None => (self.unknown)(operator, args),
		}
	}
}

impl Default for OperatorTable {
	fn default() -> Self {
		Self::standard()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::opcode::KEYWORDS;
	use clvm_core::EvalError;

	fn op(opcode: Opcode) -> Node {
		Node::from(opcode.as_atom())
	}

	#[test]
	fn standard_covers_every_keyword() {
		let standard = OperatorTable::standard();
		for (keyword, opcode) in KEYWORDS {
			let expected = opcode != Opcode::QUOTE && opcode != Opcode::APPLY;
			assert_eq!(
				standard.get(&opcode.as_atom()).is_some(),
				expected,
				"{}",
				keyword
			);
		}
		assert!(OPERATOR_LOOKUP.get(&[0x10]).is_some());
		assert!(STRICT_OPERATOR_LOOKUP.get(&[0x10]).is_some());
	}

	#[test]
	fn core_set_only() {
		let core = OperatorTable::core();
		assert!(core.get(&[0x03]).is_some());
		assert!(core.get(&[0x09]).is_some());
		assert!(core.get(&[0x10]).is_none());
		// single byte atoms only
		assert!(OperatorTable::standard().get(&[0x00, 0x10]).is_none());
	}

	#[test]
	fn dispatch_and_fallback() {
		let table = OperatorTable::standard();
		let args = Node::list(vec![Node::from(2), Node::from(3)]);
		let r = table.eval(&op(Opcode::ADD), &args).unwrap();
		assert_eq!(r.1, Node::from(5));

		let r = table.eval(&Node::from([0x3f]), &args).unwrap();
		assert_eq!(r, Reduction(1, Node::nil()));

		let err = OperatorTable::strict()
			.eval(&Node::from([0x3f]), &args)
			.unwrap_err();
		assert_eq!(err.message(), "unimplemented operator");
	}

	#[test]
	fn overrides() {
		fn always_seven(_args: &Node) -> Response {
			Ok(Reduction(7, Node::from(7)))
		}

		let mut table = OperatorTable::standard();
		table.set(Opcode::ADD, always_seven);
		assert_eq!(
			table.eval(&op(Opcode::ADD), &Node::nil()).unwrap(),
			Reduction(7, Node::from(7))
		);

		// merge keeps entries of the receiving table
		let merged = table.clone().merge(&OperatorTable::standard());
		assert_eq!(merged.eval(&op(Opcode::ADD), &Node::nil()).unwrap().0, 7);

		assert!(table.remove(Opcode::ADD).is_some());
		assert!(table.get(&[0x10]).is_none());

		fn reject(op: &Node, _args: &Node) -> Response {
			Err(EvalError::new("no", op))
		}
		let table = table.with_unknown_op_handler(reject);
		assert_eq!(
			table.eval(&op(Opcode::ADD), &Node::nil()).unwrap_err().message(),
			"no"
		);
	}

	#[test]
	fn configurable_quote_and_apply() {
		let table = OperatorTable::core()
			.with_quote(Opcode(0x71))
			.with_apply(Opcode(0x61));
		assert_eq!(table.quote(), Opcode(0x71));
		assert_eq!(table.apply(), Opcode(0x61));
	}
}
