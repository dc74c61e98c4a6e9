//! Allows to listen to evaluator events.

use core::cell::RefCell;

use clvm_core::{Cost, Node};

environmental::environmental!(listener: dyn EventListener + 'static);

std::thread_local! {
	static ENABLE_TRACING: RefCell<bool> = const { RefCell::new(false) };
}

/// Turn event delivery on or off for the current thread.
pub fn enable_tracing(enable: bool) {
	ENABLE_TRACING.with(|s| s.replace(enable));
}

pub trait EventListener {
	fn event(&mut self, event: Event);
}

#[derive(Debug, Clone)]
pub enum Event {
	/// An expression is about to be evaluated.
	PreEval { program: Node, env: Node },
	/// An expression was reduced to a value.
	PostEval { result: Node },
	/// A primitive ran.
	Apply {
		operator: Node,
		args: Node,
		cost: Cost,
	},
}

impl Event {
	pub(crate) fn emit(self) {
		ENABLE_TRACING.with(|s| {
			if *s.borrow() {
				listener::with(|listener| listener.event(self));
			}
		})
	}
}

/// Run closure with provided listener.
pub fn using<R, F: FnOnce() -> R>(new: &mut (dyn EventListener + 'static), f: F) -> R {
	listener::using(new, f)
}
