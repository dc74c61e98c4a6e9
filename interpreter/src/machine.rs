//! The evaluator.
//!
//! Evaluation runs on two explicit stacks: pending operations and values.
//! Program depth only grows these heap allocated stacks, never the native
//! call stack.

use clvm_core::{Cost, EvalError, Node, SExp};
use clvm_gasometer::costs::{APPLY_COST, EVAL_OP_COST, QUOTE_COST};
use clvm_gasometer::Gasometer;

use crate::etable::OperatorTable;
use crate::eval::{Reduction, Response};
use crate::path::traverse_path;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Operation {
	/// Pop an operator and an argument list, run the operator.
	Apply,
	/// Pop a value and a list, push the list with the value in front.
	Cons,
	/// Pop `(program . env)`, evaluate it.
	Eval,
	/// Exchange the two topmost values.
	Swap,
}

/// State of one evaluation.
pub struct Machine<'t> {
	table: &'t OperatorTable,
	ops: Vec<Operation>,
	values: Vec<Node>,
	gasometer: Gasometer,
}

impl<'t> Machine<'t> {
	/// Prepare the evaluation of `program` against `env`. `None` means
	/// unbounded cost.
	pub fn new(table: &'t OperatorTable, program: Node, env: Node, max_cost: Option<Cost>) -> Self {
		Self {
			table,
			ops: vec![Operation::Eval],
			values: vec![Node::pair(program, env)],
			gasometer: Gasometer::new(max_cost),
		}
	}

	pub fn gasometer(&self) -> &Gasometer {
		&self.gasometer
	}

	pub fn is_finished(&self) -> bool {
		self.ops.is_empty()
	}

	/// Loop stepping the machine until it stops.
	pub fn run(mut self) -> Response {
		while !self.is_finished() {
			self.step()?;
		}
		let cost = self.gasometer.used()?;
		let result = self.pop()?;
		log::debug!(target: "clvm", "evaluation finished with cost {}", cost);
		Ok(Reduction(cost, result))
	}

	/// Perform one pending operation and charge its cost.
	pub fn step(&mut self) -> Result<(), EvalError> {
		let op = match self.ops.pop() {
			Some(op) => op,
			None => return Ok(()),
		};
		let cost = match op {
			Operation::Apply => self.apply_op()?,
			Operation::Cons => {
				let first = self.pop()?;
				let rest = self.pop()?;
				self.values.push(Node::pair(first, rest));
				0
			}
			Operation::Eval => self.eval_op()?,
			Operation::Swap => {
				let v2 = self.pop()?;
				let v1 = self.pop()?;
				self.values.push(v2);
				self.values.push(v1);
				0
			}
		};
		self.gasometer.record_cost(cost)
	}

	fn pop(&mut self) -> Result<Node, EvalError> {
		self.values
			.pop()
			.ok_or_else(|| EvalError::new("internal error: value stack underflow", &Node::nil()))
	}

	fn eval_op(&mut self) -> Result<Cost, EvalError> {
		let pair = self.pop()?;
		let (program, env) = pair
			.as_pair()
			.ok_or_else(|| EvalError::new("internal error: expected (program . env)", &pair))?;

		event!(PreEval {
			program: program.clone(),
			env: env.clone(),
		});

		let (operator, operands) = match program.sexp() {
			SExp::Atom(path) => {
				let Reduction(cost, result) = traverse_path(path, env)?;
				event!(PostEval {
					result: result.clone()
				});
				self.values.push(result);
				return Ok(cost);
			}
			SExp::Pair(operator, operands) => (operator, operands),
		};

		let op = match operator.sexp() {
			SExp::Pair(inner, must_be_nil) => {
				// ((X) . operands): X runs with the unevaluated operands as
				// its environment
				if !must_be_nil.nullp() {
					return Err(EvalError::new(
						"in ((X)...) syntax X must be lone atom",
						program,
					));
				}
				self.values.push(Node::pair(inner.clone(), operands.clone()));
				self.ops.push(Operation::Eval);
				return Ok(APPLY_COST);
			}
			SExp::Atom(op) => op,
		};

		if op[..] == self.table.quote().as_atom()[..] {
			event!(PostEval {
				result: operands.clone()
			});
			self.values.push(operands.clone());
			return Ok(QUOTE_COST);
		}

		self.ops.push(Operation::Apply);
		self.values.push(operator.clone());
		let mut items = operands.iter();
		for item in items.by_ref() {
			self.values.push(Node::pair(item.clone(), env.clone()));
			self.ops.push(Operation::Cons);
			self.ops.push(Operation::Eval);
			self.ops.push(Operation::Swap);
		}
		let terminator = items.remainder();
		if !terminator.nullp() {
			return Err(EvalError::new("first of non-cons", terminator));
		}
		self.values.push(Node::nil());
		Ok(EVAL_OP_COST)
	}

	fn apply_op(&mut self) -> Result<Cost, EvalError> {
		let args = self.pop()?;
		let operator = self.pop()?;
		let op = operator
			.atom_bytes()
			.ok_or_else(|| EvalError::new("internal error: operator is a pair", &operator))?;

		if op == &self.table.apply().as_atom()[..] {
			let mut items = args.iter();
			let (program, env) = match (items.next(), items.next(), items.next()) {
				(Some(program), Some(env), None) => (program, env),
				_ => {
					return Err(EvalError::new("apply requires exactly 2 parameters", &args));
				}
			};
			self.values.push(Node::pair(program.clone(), env.clone()));
			self.ops.push(Operation::Eval);
			return Ok(APPLY_COST);
		}

		let Reduction(cost, result) = self.table.eval(&operator, &args)?;
		log::trace!(target: "clvm", "operator {:?} cost {}", operator, cost);
		event!(Apply {
			operator: operator.clone(),
			args: args.clone(),
			cost,
		});
		event!(PostEval {
			result: result.clone()
		});
		self.values.push(result);
		Ok(cost)
	}
}

/// Evaluate `program` against `env`, returning the total cost and the result.
pub fn run_program(
	table: &OperatorTable,
	program: &Node,
	env: &Node,
	max_cost: Option<Cost>,
) -> Response {
	Machine::new(table, program.clone(), env.clone(), max_cost).run()
}
