//! Integer view of atoms.
//!
//! Atoms are read as signed big-endian two's-complement integers. Writing an
//! integer always produces the minimal encoding: zero is the empty atom and a
//! leading `0x00`/`0xff` byte is present only when the sign bit would
//! otherwise be wrong.

use num_bigint::{BigInt, Sign};
use num_traits::Zero;

pub fn number_from_bytes(bytes: &[u8]) -> BigInt {
	if bytes.is_empty() {
		BigInt::zero()
	} else {
		BigInt::from_signed_bytes_be(bytes)
	}
}

/// Read an atom as an unsigned big-endian integer.
pub fn unsigned_from_bytes(bytes: &[u8]) -> BigInt {
	BigInt::from_bytes_be(Sign::Plus, bytes)
}

pub fn number_to_bytes(v: &BigInt) -> Vec<u8> {
	if v.is_zero() {
		Vec::new()
	} else {
		v.to_signed_bytes_be()
	}
}

/// Bytes needed for the magnitude of `v`, without any sign byte.
pub fn limbs_for_int(v: &BigInt) -> u64 {
	(v.bits() + 7) >> 3
}

#[cfg(test)]
mod tests {
	use super::*;

	fn roundtrip(v: i64) {
		let n = BigInt::from(v);
		let bytes = number_to_bytes(&n);
		assert_eq!(number_from_bytes(&bytes), n);
		if bytes.len() > 1 {
			// no redundant leading byte
			let redundant = (bytes[0] == 0x00 && bytes[1] & 0x80 == 0)
				|| (bytes[0] == 0xff && bytes[1] & 0x80 != 0);
			assert!(!redundant, "{} encoded as {:02x?}", v, bytes);
		}
	}

	#[test]
	fn minimal_encoding_roundtrips() {
		for v in [
			1, -1, 127, 128, -128, -129, 255, 256, 32767, 32768, -32768, -32769, 0x7fff_ffff,
			i64::MAX, i64::MIN,
		] {
			roundtrip(v);
		}
	}

	#[test]
	fn sign_byte_added_only_when_needed() {
		assert_eq!(number_to_bytes(&BigInt::from(0x80)), vec![0x00, 0x80]);
		assert_eq!(number_to_bytes(&BigInt::from(0x7f)), vec![0x7f]);
		assert_eq!(number_to_bytes(&BigInt::from(-0x80)), vec![0x80]);
		assert_eq!(number_to_bytes(&BigInt::from(-0x81)), vec![0xff, 0x7f]);
	}

	#[test]
	fn non_minimal_input_is_still_read() {
		assert_eq!(number_from_bytes(&[0x00, 0x00, 0x01]), BigInt::from(1));
		assert_eq!(number_from_bytes(&[0xff, 0xff]), BigInt::from(-1));
		assert_eq!(number_from_bytes(&[]), BigInt::from(0));
		assert_eq!(unsigned_from_bytes(&[0xff]), BigInt::from(255));
	}

	#[test]
	fn limbs_ignore_sign() {
		assert_eq!(limbs_for_int(&BigInt::from(0)), 0);
		assert_eq!(limbs_for_int(&BigInt::from(255)), 1);
		assert_eq!(limbs_for_int(&BigInt::from(256)), 2);
		assert_eq!(limbs_for_int(&BigInt::from(-255)), 1);
	}
}
