//! Elliptic-curve groups and deterministic ECDSA over the `bignum` engine.
//!
//! Three curve families are provided behind a closed set of named parameter
//! sets: short Weierstrass (with an endomorphism-accelerated secp256k1),
//! x-only Montgomery, and extended-coordinate twisted Edwards. The ECDSA
//! engine derives per-signature nonces from an HMAC-SHA-256 deterministic bit
//! generator, so signing needs no runtime randomness.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod curve;
pub mod drbg;
pub mod ecdsa;

pub use curve::{Curve, CurveId};
pub use drbg::HmacDrbg;
pub use ecdsa::{Ecdsa, KeyPair, Signature};

use core::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Coordinates fail the curve equation or the order check.
    InvalidPoint,
    /// Wrong-length or out-of-field point or key encoding.
    InvalidEncoding,
    /// Out-of-range r/s, malformed compact encoding, or an unusable
    /// signature/recovery-id combination.
    InvalidSignature,
    /// Private scalar outside `[1, n)`.
    InvalidPrivateKey,
    /// The deterministic bit generator exceeded its reseed interval.
    ReseedRequired,
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPoint => write!(f, "crypto: point is not on the curve"),
            Self::InvalidEncoding => write!(f, "crypto: malformed point encoding"),
            Self::InvalidSignature => write!(f, "crypto: malformed or out-of-range signature"),
            Self::InvalidPrivateKey => write!(f, "crypto: private key out of range"),
            Self::ReseedRequired => write!(f, "crypto: drbg reseed required"),
        }
    }
}
