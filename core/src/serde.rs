//! Canonical binary encoding of node trees.
//!
//! | First byte    | Meaning                                                  |
//! |---------------|----------------------------------------------------------|
//! | `0x00..=0x7f` | one byte atom holding that byte                          |
//! | `0x80`        | empty atom                                               |
//! | `0x81..=0xfe` | length prefix (leading one bits give the prefix size)    |
//! | `0xff`        | pair: first, then rest, follow                           |
//!
//! Both directions run on an explicit work stack.

use std::io::{self, Cursor, Read, Write};

use crate::error::SerializationError;
use crate::node::{Node, SExp};

const MAX_SINGLE_BYTE: u8 = 0x7f;
const CONS_BOX_MARKER: u8 = 0xff;
const EMPTY_ATOM: u8 = 0x80;
const MAX_ATOM_LEN: u64 = 0x4_0000_0000;

/// Write the canonical encoding of `node` into `f`.
pub fn node_to_stream<W: Write>(node: &Node, f: &mut W) -> Result<(), SerializationError> {
	let mut todo = vec![node];
	while let Some(node) = todo.pop() {
		match node.sexp() {
			SExp::Pair(first, rest) => {
				f.write_all(&[CONS_BOX_MARKER])?;
				todo.push(rest);
				todo.push(first);
			}
			SExp::Atom(atom) => write_atom(f, atom)?,
		}
	}
	Ok(())
}

pub fn node_to_bytes(node: &Node) -> Result<Vec<u8>, SerializationError> {
	let mut buffer = Vec::new();
	node_to_stream(node, &mut buffer)?;
	Ok(buffer)
}

fn write_atom<W: Write>(f: &mut W, atom: &[u8]) -> Result<(), SerializationError> {
	let size = atom.len() as u64;
	if size == 0 {
		f.write_all(&[EMPTY_ATOM])?;
		return Ok(());
	}
	if size == 1 && atom[0] <= MAX_SINGLE_BYTE {
		f.write_all(atom)?;
		return Ok(());
	}

	if size < 0x40 {
		f.write_all(&[0x80 | size as u8])?;
	} else if size < 0x2000 {
		f.write_all(&[0xc0 | (size >> 8) as u8, size as u8])?;
	} else if size < 0x10_0000 {
		f.write_all(&[0xe0 | (size >> 16) as u8, (size >> 8) as u8, size as u8])?;
	} else if size < 0x800_0000 {
		f.write_all(&[
			0xf0 | (size >> 24) as u8,
			(size >> 16) as u8,
			(size >> 8) as u8,
			size as u8,
		])?;
	} else if size < MAX_ATOM_LEN {
		f.write_all(&[
			0xf8 | (size >> 32) as u8,
			(size >> 24) as u8,
			(size >> 16) as u8,
			(size >> 8) as u8,
			size as u8,
		])?;
	} else {
		return Err(SerializationError::TooLarge);
	}
	f.write_all(atom)?;
	Ok(())
}

enum ParseOp {
	Node,
	Cons,
}

/// Decode one node from the cursor, leaving it positioned just after the
/// node. Trailing bytes are not inspected.
pub fn node_from_stream(f: &mut Cursor<&[u8]>) -> Result<Node, SerializationError> {
	let mut values: Vec<Node> = Vec::new();
	let mut ops = vec![ParseOp::Node];
	let mut b = [0; 1];

	while let Some(op) = ops.pop() {
		match op {
			ParseOp::Node => {
				f.read_exact(&mut b)?;
				if b[0] == CONS_BOX_MARKER {
					ops.push(ParseOp::Cons);
					ops.push(ParseOp::Node);
					ops.push(ParseOp::Node);
				} else {
					values.push(Node::atom(atom_from_stream(f, b[0])?));
				}
			}
			ParseOp::Cons => {
				let rest = values.pop().ok_or(SerializationError::BadEncoding)?;
				let first = values.pop().ok_or(SerializationError::BadEncoding)?;
				values.push(Node::pair(first, rest));
			}
		}
	}

	values.pop().ok_or(SerializationError::BadEncoding)
}

pub fn node_from_bytes(bytes: &[u8]) -> Result<Node, SerializationError> {
	node_from_stream(&mut Cursor::new(bytes))
}

fn atom_from_stream(f: &mut Cursor<&[u8]>, b: u8) -> Result<Vec<u8>, SerializationError> {
	if b == EMPTY_ATOM {
		return Ok(Vec::new());
	}
	if b <= MAX_SINGLE_BYTE {
		return Ok(vec![b]);
	}
	let size = decode_size(f, b)?;
	let remaining = remaining(f);
	if size > remaining {
		return Err(SerializationError::BadEncoding);
	}
	let mut blob = vec![0; size as usize];
	f.read_exact(&mut blob)?;
	Ok(blob)
}

/// Decode the length prefix that starts with `initial`, consuming any extra
/// prefix bytes from `f`.
fn decode_size<R: Read>(f: &mut R, initial: u8) -> Result<u64, SerializationError> {
	let mut b = initial;
	let mut bit_count = 0;
	let mut bit_mask = 0x80;
	while b & bit_mask != 0 {
		bit_count += 1;
		b &= 0xff ^ bit_mask;
		bit_mask >>= 1;
	}

	let mut size = b as u64;
	if bit_count > 1 {
		let mut extra = [0; 8];
		let extra = &mut extra[..bit_count - 1];
		f.read_exact(extra)?;
		for byte in extra.iter() {
			size = (size << 8) | *byte as u64;
		}
	}
	if size >= MAX_ATOM_LEN {
		return Err(SerializationError::TooLarge);
	}
	Ok(size)
}

fn remaining(f: &Cursor<&[u8]>) -> u64 {
	(f.get_ref().len() as u64).saturating_sub(f.position())
}

/// Length in bytes of the single serialized node at the start of `buf`,
/// found without building the tree.
pub fn serialized_length(buf: &[u8]) -> Result<u64, SerializationError> {
	let mut f = Cursor::new(buf);
	let mut pending: u64 = 1;
	let mut b = [0; 1];
	while pending > 0 {
		pending -= 1;
		f.read_exact(&mut b)?;
		if b[0] == CONS_BOX_MARKER {
			pending += 2;
		} else if b[0] != EMPTY_ATOM && b[0] > MAX_SINGLE_BYTE {
			let size = decode_size(&mut f, b[0])?;
			if size > remaining(&f) {
				return Err(SerializationError::BadEncoding);
			}
			f.set_position(f.position() + size);
		}
	}
	Ok(f.position())
}

/// Split the first serialized node off `buf`, returning its bytes and the
/// remainder.
pub fn split_serialized(buf: &[u8]) -> Result<(&[u8], &[u8]), SerializationError> {
	let len = serialized_length(buf)? as usize;
	Ok(buf.split_at(len))
}

impl From<SerializationError> for io::Error {
	fn from(e: SerializationError) -> Self {
		match e {
			SerializationError::Io(e) => e,
			other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
		}
	}
}
