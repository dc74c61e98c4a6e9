//! Cost accounting for one evaluation.

#![forbid(unsafe_code)]

pub mod costs;

use clvm_core::{Cost, EvalError};

/// Cost counter of a single `run` call.
///
/// Once the limit is passed the gasometer stays failed: further records keep
/// returning the same error and the used amount stops moving.
#[derive(Clone, Debug)]
pub struct Gasometer {
	limit: Option<Cost>,
	inner: Result<Cost, EvalError>,
}

impl Gasometer {
	/// `None` means unbounded.
	pub fn new(limit: Option<Cost>) -> Self {
		Self {
			limit,
			inner: Ok(0),
		}
	}

	pub fn limit(&self) -> Option<Cost> {
		self.limit
	}

	/// Cost charged so far, or the failure that stopped the count.
	pub fn used(&self) -> Result<Cost, EvalError> {
		self.inner.clone()
	}

	/// Budget left before the limit is passed.
	pub fn remaining(&self) -> Option<Cost> {
		match (&self.inner, self.limit) {
			(Ok(used), Some(limit)) => Some(limit.saturating_sub(*used)),
			(Err(_), Some(_)) => Some(0),
			(_, None) => None,
		}
	}

	/// Charge `cost`, failing as soon as the running total exceeds the limit.
	pub fn record_cost(&mut self, cost: Cost) -> Result<(), EvalError> {
		let used = self.inner.clone()?;
		let total = used.saturating_add(cost);

		match self.limit {
			Some(max_cost) if total > max_cost => {
				log::debug!(target: "clvm", "cost exceeded: {} > {}", total, max_cost);
				let err = EvalError::CostExceeded { max_cost };
				self.inner = Err(err.clone());
				Err(err)
			}
			_ => {
				self.inner = Ok(total);
				Ok(())
			}
		}
	}
}
