use clvm_core::Cost;
use clvm_gasometer::costs::MAX_BLOCK_COST;
use clvm_interpreter::{OperatorTable, OPERATOR_LOOKUP, STRICT_OPERATOR_LOOKUP};

/// Evaluation configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct Config {
	/// Cost budget of a run. `None` is unbounded.
	pub max_cost: Option<Cost>,
	/// Treat opcodes outside the operator table as fatal instead of charging
	/// them by their cost shape.
	pub strict: bool,
}

impl Config {
	/// Unbounded, lenient configuration.
	pub const fn new() -> Config {
		Config {
			max_cost: None,
			strict: false,
		}
	}

	/// The block cost limit of the main network.
	pub const fn mainnet() -> Config {
		Config {
			max_cost: Some(MAX_BLOCK_COST),
			strict: false,
		}
	}

	pub const fn with_max_cost(mut self, max_cost: Option<Cost>) -> Config {
		self.max_cost = max_cost;
		self
	}

	pub const fn with_strict(mut self, strict: bool) -> Config {
		self.strict = strict;
		self
	}

	/// Operator table selected by the strictness flag.
	pub fn table(&self) -> &'static OperatorTable {
		if self.strict {
			&*STRICT_OPERATOR_LOOKUP
		} else {
			&*OPERATOR_LOOKUP
		}
	}
}
