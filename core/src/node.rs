use std::fmt;
use std::mem;
use std::sync::{Arc, OnceLock};

use num_bigint::BigInt;

use crate::error::EvalError;
use crate::number::{number_from_bytes, number_to_bytes};
use crate::serde::node_to_bytes;

/// Shape of a node: a byte string or a cons cell.
pub enum SExp {
	Atom(Vec<u8>),
	Pair(Node, Node),
}

/// Immutable, shareable tree value.
///
/// Clones are reference-counted handles, so a tree can be reused across
/// evaluations and threads without copying. Comparison and destruction walk
/// the tree with an explicit stack and never recurse on tree depth.
#[derive(Clone)]
pub struct Node(Arc<SExp>);

static NIL: OnceLock<Node> = OnceLock::new();
static ONE: OnceLock<Node> = OnceLock::new();

impl Node {
	/// Create an atom holding `bytes`.
	pub fn atom<B: Into<Vec<u8>>>(bytes: B) -> Self {
		Self(Arc::new(SExp::Atom(bytes.into())))
	}

	/// Create the pair `(first . rest)`.
	pub fn pair(first: Node, rest: Node) -> Self {
		Self(Arc::new(SExp::Pair(first, rest)))
	}

	/// The empty atom, doubling as boolean false and the empty list.
	pub fn nil() -> Self {
		NIL.get_or_init(|| Self::atom(Vec::new())).clone()
	}

	/// The single byte `0x01`, emitted by operators producing true.
	pub fn one() -> Self {
		ONE.get_or_init(|| Self::atom(vec![1])).clone()
	}

	pub fn from_bool(v: bool) -> Self {
		if v {
			Self::one()
		} else {
			Self::nil()
		}
	}

	/// Build a right-nested, nil terminated list.
	pub fn list<I>(items: I) -> Self
	where
		I: IntoIterator<Item = Node>,
		I::IntoIter: DoubleEndedIterator,
	{
		items
			.into_iter()
			.rev()
			.fold(Self::nil(), |rest, first| Self::pair(first, rest))
	}

	#[inline]
	pub fn sexp(&self) -> &SExp {
		&self.0
	}

	#[inline]
	pub fn is_atom(&self) -> bool {
		matches!(*self.0, SExp::Atom(_))
	}

	#[inline]
	pub fn is_pair(&self) -> bool {
		matches!(*self.0, SExp::Pair(..))
	}

	pub fn atom_bytes(&self) -> Option<&[u8]> {
		match self.sexp() {
			SExp::Atom(bytes) => Some(bytes),
			SExp::Pair(..) => None,
		}
	}

	pub fn as_pair(&self) -> Option<(&Node, &Node)> {
		match self.sexp() {
			SExp::Pair(first, rest) => Some((first, rest)),
			SExp::Atom(_) => None,
		}
	}

	pub fn first(&self) -> Result<&Node, EvalError> {
		match self.sexp() {
			SExp::Pair(first, _) => Ok(first),
			SExp::Atom(_) => Err(EvalError::new("first of non-cons", self)),
		}
	}

	pub fn rest(&self) -> Result<&Node, EvalError> {
		match self.sexp() {
			SExp::Pair(_, rest) => Ok(rest),
			SExp::Atom(_) => Err(EvalError::new("rest of non-cons", self)),
		}
	}

	/// True for the empty atom only.
	pub fn nullp(&self) -> bool {
		matches!(self.sexp(), SExp::Atom(bytes) if bytes.is_empty())
	}

	/// Number of pairs on the `rest` chain. The terminator is not inspected.
	pub fn list_len(&self) -> usize {
		self.iter().count()
	}

	/// Iterate over the items of a right-nested list. Iteration stops at the
	/// first atom on the `rest` chain, whatever its contents.
	pub fn iter(&self) -> ListIter<'_> {
		ListIter { next: self }
	}

	/// Signed big-endian two's-complement value of an atom.
	pub fn as_bigint(&self) -> Option<BigInt> {
		self.atom_bytes().map(number_from_bytes)
	}

	/// A pair no other handle refers to.
	fn is_unique_pair(&self) -> bool {
		self.is_pair() && Arc::strong_count(&self.0) == 1
	}

	/// Whether two handles point to the same allocation.
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Default for Node {
	fn default() -> Self {
		Self::nil()
	}
}

impl Drop for Node {
	fn drop(&mut self) {
		let Some(SExp::Pair(first, rest)) = Arc::get_mut(&mut self.0) else {
			return;
		};
		if !first.is_unique_pair() && !rest.is_unique_pair() {
			return;
		}

		// uniquely owned pairs are unlinked onto a local stack, leaving a
		// private empty atom in their place
		let hole = Node(Arc::new(SExp::Atom(Vec::new())));
		let mut pending = Vec::new();
		unlink(first, &hole, &mut pending);
		unlink(rest, &hole, &mut pending);
		while let Some(mut node) = pending.pop() {
			if let Some(SExp::Pair(first, rest)) = Arc::get_mut(&mut node.0) {
				unlink(first, &hole, &mut pending);
				unlink(rest, &hole, &mut pending);
			}
		}
	}
}

fn unlink(child: &mut Node, hole: &Node, pending: &mut Vec<Node>) {
	if child.is_unique_pair() {
		pending.push(mem::replace(child, hole.clone()));
	}
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		let mut pending = vec![(self, other)];
		while let Some((a, b)) = pending.pop() {
			if a.ptr_eq(b) {
				continue;
			}
			match (a.sexp(), b.sexp()) {
				(SExp::Atom(x), SExp::Atom(y)) => {
					if x != y {
						return false;
					}
				}
				(SExp::Pair(f1, r1), SExp::Pair(f2, r2)) => {
					pending.push((r1, r2));
					pending.push((f1, f2));
				}
				_ => return false,
			}
		}
		true
	}
}

impl Eq for Node {}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match node_to_bytes(self) {
			Ok(bytes) => write!(f, "Node({})", hex::encode(bytes)),
			Err(_) => write!(f, "Node(<unserializable>)"),
		}
	}
}

/// Lazy iterator over list items; see [`Node::iter`].
#[derive(Clone)]
pub struct ListIter<'a> {
	next: &'a Node,
}

impl<'a> ListIter<'a> {
	/// The node iteration stopped at (or will stop at): the list terminator
	/// once the iterator is exhausted.
	pub fn remainder(&self) -> &'a Node {
		self.next
	}
}

impl<'a> Iterator for ListIter<'a> {
	type Item = &'a Node;

	fn next(&mut self) -> Option<&'a Node> {
		match self.next.sexp() {
			SExp::Pair(first, rest) => {
				self.next = rest;
				Some(first)
			}
			SExp::Atom(_) => None,
		}
	}
}

impl From<Vec<u8>> for Node {
	fn from(v: Vec<u8>) -> Self {
		Self::atom(v)
	}
}

impl From<&[u8]> for Node {
	fn from(v: &[u8]) -> Self {
		Self::atom(v)
	}
}

impl<const N: usize> From<[u8; N]> for Node {
	fn from(v: [u8; N]) -> Self {
		Self::atom(v.to_vec())
	}
}

impl From<&str> for Node {
	fn from(v: &str) -> Self {
		Self::atom(v.as_bytes())
	}
}

impl From<bool> for Node {
	fn from(v: bool) -> Self {
		Self::from_bool(v)
	}
}

impl From<&BigInt> for Node {
	fn from(v: &BigInt) -> Self {
		Self::atom(number_to_bytes(v))
	}
}

impl From<BigInt> for Node {
	fn from(v: BigInt) -> Self {
		Self::from(&v)
	}
}

impl From<(Node, Node)> for Node {
	fn from((first, rest): (Node, Node)) -> Self {
		Self::pair(first, rest)
	}
}

macro_rules! impl_from_int {
	($($t:ty),*) => {
		$(
			impl From<$t> for Node {
				fn from(v: $t) -> Self {
					Self::from(BigInt::from(v))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
