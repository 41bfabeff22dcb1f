//! Arbitrary-precision sign-magnitude integers with modular-reduction contexts.
//!
//! The [`BigInt`] type stores a little-limb-first `u64` magnitude plus a sign
//! and owns all arithmetic primitives. [`reduce::ReduceCtx`] wraps a modulus
//! together with precomputed fast-reduction parameters (pseudo-Mersenne or
//! Montgomery) and operates on tagged [`reduce::Reduced`] values, so plain and
//! reduced representations cannot be mixed by accident.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod bigint;
mod convert;
mod div;
mod gcd;
mod mul;
pub mod reduce;

pub use bigint::BigInt;
pub use reduce::{ReduceCtx, Reduced};

use core::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed digit characters, an out-of-range radix or empty input.
    InvalidFormat,
    DivisionByZero,
    /// A fixed-length byte export was requested for a value that does not fit.
    BufferTooSmall,
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidFormat => write!(f, "bignum: malformed numeric input"),
            Self::DivisionByZero => write!(f, "bignum: division by zero"),
            Self::BufferTooSmall => write!(f, "bignum: value does not fit the requested width"),
        }
    }
}
