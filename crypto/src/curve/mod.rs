//! Elliptic-curve groups.
//!
//! Three coordinate systems, one per curve family: Jacobian projective for
//! short Weierstrass, x-only XZ for Montgomery ladders, and extended
//! coordinates for twisted Edwards. Field arithmetic goes through a
//! `bignum::ReduceCtx` per curve, so each parameter set picks up the fastest
//! reduction its prime admits.

pub mod edwards;
pub mod mont;
pub mod params;
pub mod short;
pub(crate) mod wnaf;

pub use edwards::{EdPoint, EdwardsCurve};
pub use mont::{MontCurve, MontPoint};
pub use params::{Curve, CurveId};
pub use short::{JPoint, Point, ShortCurve};
