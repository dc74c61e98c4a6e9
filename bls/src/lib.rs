//! BLS12-381 G1 arithmetic for the `point_add` and `pubkey_for_exp`
//! operators.
//!
//! The capability lives in process-wide state and must be set up once with
//! [`initialize`] before the first operator call. Until then [`loaded`]
//! fails with [`BlsError::NotLoaded`]. Initialization is memoized: after the
//! first success every later call returns the same handle without redoing
//! any work.
//!
//! Points use the 48-byte compressed encoding (zcash flag bits in the top
//! three bits of the first byte).

#![forbid(unsafe_code)]

use core::fmt;
use core::ops::{Add, AddAssign};
use std::sync::OnceLock;

use ark_bls12_381::{Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use clvm_core::{EvalError, Node};

/// Length of a compressed G1 point.
pub const G1_COMPRESSED_LEN: usize = 48;

/// Order of the BLS12-381 scalar field (and of G1), big-endian.
pub const GROUP_ORDER: [u8; 32] =
	hex_literal::hex!("73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001");

/// Compressed encoding of the G1 generator, checked during setup.
const GENERATOR_COMPRESSED: [u8; G1_COMPRESSED_LEN] = hex_literal::hex!(
	"97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
);

static CAPABILITY: OnceLock<Bls> = OnceLock::new();

/// Failure reported by the capability.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BlsError {
	/// [`initialize`] has not completed yet.
	NotLoaded,
	/// Input is not exactly [`G1_COMPRESSED_LEN`] bytes.
	InvalidLength(usize),
	/// Bytes do not describe a point of the prime-order subgroup.
	InvalidPoint,
	/// Encoding a point failed.
	Serialization,
	/// The backend disagrees with the expected generator encoding.
	SelfCheck,
}

impl fmt::Display for BlsError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotLoaded => write!(f, "module not loaded"),
			Self::InvalidLength(len) => {
				write!(f, "expected {} bytes, got {}", G1_COMPRESSED_LEN, len)
			}
			Self::InvalidPoint => write!(f, "invalid G1 point"),
			Self::Serialization => write!(f, "cannot serialize G1 point"),
			Self::SelfCheck => write!(f, "generator self check failed"),
		}
	}
}

impl std::error::Error for BlsError {}

impl From<BlsError> for EvalError {
	fn from(e: BlsError) -> Self {
		EvalError::new(e.to_string(), &Node::nil())
	}
}

/// A G1 group element.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct G1Point(G1Projective);

impl G1Point {
	pub fn identity() -> Self {
		Self(G1Projective::zero())
	}
}

impl Default for G1Point {
	fn default() -> Self {
		Self::identity()
	}
}

impl Add for G1Point {
	type Output = G1Point;

	fn add(self, rhs: G1Point) -> G1Point {
		G1Point(self.0 + rhs.0)
	}
}

impl AddAssign for G1Point {
	fn add_assign(&mut self, rhs: G1Point) {
		self.0 += rhs.0;
	}
}

/// Handle to the initialized capability.
pub struct Bls {
	generator: G1Affine,
}

impl Bls {
	fn setup() -> Result<Self, BlsError> {
		let bls = Self {
			generator: G1Affine::generator(),
		};
		if bls.point_to_bytes(&bls.generator())? != GENERATOR_COMPRESSED {
			return Err(BlsError::SelfCheck);
		}
		Ok(bls)
	}

	pub fn generator(&self) -> G1Point {
		G1Point(self.generator.into_group())
	}

	/// Parse a compressed point, checking it is on the curve and in the
	/// prime-order subgroup.
	pub fn point_from_bytes(&self, bytes: &[u8]) -> Result<G1Point, BlsError> {
		if bytes.len() != G1_COMPRESSED_LEN {
			return Err(BlsError::InvalidLength(bytes.len()));
		}
		let point = G1Affine::deserialize_compressed(bytes).map_err(|_| BlsError::InvalidPoint)?;
		Ok(G1Point(point.into_group()))
	}

	pub fn point_to_bytes(&self, point: &G1Point) -> Result<Vec<u8>, BlsError> {
		let mut out = Vec::with_capacity(G1_COMPRESSED_LEN);
		point
			.0
			.into_affine()
			.serialize_compressed(&mut out)
			.map_err(|_| BlsError::Serialization)?;
		Ok(out)
	}

	/// Sum of all given compressed points.
	pub fn point_add<'a, I>(&self, points: I) -> Result<G1Point, BlsError>
	where
		I: IntoIterator<Item = &'a [u8]>,
	{
		let mut acc = G1Point::identity();
		for bytes in points {
			acc += self.point_from_bytes(bytes)?;
		}
		Ok(acc)
	}

	/// `scalar * G` for a big-endian scalar. Values at or above the group
	/// order wrap around.
	pub fn g1_from_exponent(&self, scalar: &[u8]) -> G1Point {
		let fr = Fr::from_be_bytes_mod_order(scalar);
		G1Point(self.generator.mul_bigint(fr.into_bigint()))
	}
}

/// Set up the capability, or return the handle from an earlier successful
/// call. A failed setup leaves nothing cached and may be retried.
pub async fn initialize() -> Result<&'static Bls, BlsError> {
	if let Some(bls) = CAPABILITY.get() {
		return Ok(bls);
	}
	let bls = Bls::setup()?;
	log::debug!(target: "clvm-bls", "BLS12-381 capability initialized");
	Ok(CAPABILITY.get_or_init(|| bls))
}

/// The initialized capability.
pub fn loaded() -> Result<&'static Bls, BlsError> {
	CAPABILITY.get().ok_or(BlsError::NotLoaded)
}
