//! Montgomery curves `b*y^2 = x^3 + a*x^2 + x`, x-coordinate only.
//!
//! Points carry projective `(X : Z)` with the y coordinate dropped, which
//! identifies `P` and `-P`. The ladder works on x coordinates alone, one
//! differential addition and one doubling per scalar bit.

use crate::Error;
use alloc::vec::Vec;
use bignum::{BigInt, ReduceCtx, Reduced};
use core::cmp::Ordering;

/// `(X : Z)` with `x = X/Z`; `Z = 0` is the identity.
#[derive(Clone)]
pub struct MontPoint {
    x: Reduced,
    z: Reduced,
}

impl MontPoint {
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }
}

pub struct MontCurve {
    field: ReduceCtx,
    n: BigInt,
    /// `(a + 2) / 4`, the only curve constant the ladder needs.
    a24: Reduced,
    g: MontPoint,
}

impl MontCurve {
    pub fn new(p: BigInt, a: BigInt, n: BigInt, gx: BigInt) -> Self {
        assert!(!n.is_negative() && !n.is_zero() && !n.is_one());
        let field = ReduceCtx::new(p);
        let a2 = field.add(&field.enter(&a), &field.enter_u64(2));
        let a24 = field.mul(&a2, &field.invert(&field.enter_u64(4)));
        let g = MontPoint {
            x: field.enter(&gx),
            z: field.one(),
        };
        Self { field, n, a24, g }
    }

    pub fn generator(&self) -> &MontPoint {
        &self.g
    }

    pub fn order(&self) -> &BigInt {
        &self.n
    }

    pub fn infinity(&self) -> MontPoint {
        MontPoint {
            x: self.field.one(),
            z: self.field.zero(),
        }
    }

    pub fn point_from_x(&self, x: &BigInt) -> Result<MontPoint, Error> {
        if x.is_negative() || x.ucmp(self.field.modulus()) != Ordering::Less {
            return Err(Error::InvalidEncoding);
        }
        Ok(MontPoint {
            x: self.field.enter(x),
            z: self.field.one(),
        })
    }

    /// Normalized x coordinate; `None` for the identity.
    pub fn affine_x(&self, p: &MontPoint) -> Option<BigInt> {
        if p.is_infinity() {
            return None;
        }
        let f = &self.field;
        Some(f.exit(&f.mul(&p.x, &f.invert(&p.z))))
    }

    pub fn eq(&self, p: &MontPoint, q: &MontPoint) -> bool {
        if p.is_infinity() || q.is_infinity() {
            return p.is_infinity() == q.is_infinity();
        }
        let f = &self.field;
        f.mul(&p.x, &q.z) == f.mul(&q.x, &p.z)
    }

    /// Little-endian x coordinate, the X25519 wire form.
    pub fn encode_point(&self, p: &MontPoint) -> Result<Vec<u8>, Error> {
        let x = self.affine_x(p).ok_or(Error::InvalidPoint)?;
        // x < p always fits the field width
        Ok(x.to_bytes_le(self.field.modulus().byte_len()).unwrap())
    }

    pub fn decode_point(&self, bytes: &[u8]) -> Result<MontPoint, Error> {
        if bytes.len() != self.field.modulus().byte_len() {
            return Err(Error::InvalidEncoding);
        }
        self.point_from_x(&BigInt::from_bytes_le(bytes))
    }

    pub fn dbl(&self, p: &MontPoint) -> MontPoint {
        let f = &self.field;
        // https://hyperelliptic.org/EFD/g1p/auto-montgom-xz.html#doubling-dbl-1987-m
        let aa = f.sqr(&f.add(&p.x, &p.z));
        let bb = f.sqr(&f.sub(&p.x, &p.z));
        let c = f.sub(&aa, &bb);
        let nx = f.mul(&aa, &bb);
        let nz = f.mul(&c, &f.add(&bb, &f.mul(&self.a24, &c)));
        MontPoint { x: nx, z: nz }
    }

    /// `p + q` given `diff = p - q`.
    pub fn diff_add(&self, p: &MontPoint, q: &MontPoint, diff: &MontPoint) -> MontPoint {
        let f = &self.field;
        let a = f.add(&p.x, &p.z);
        let b = f.sub(&p.x, &p.z);
        let c = f.add(&q.x, &q.z);
        let d = f.sub(&q.x, &q.z);
        let da = f.mul(&d, &a);
        let cb = f.mul(&c, &b);
        let nx = f.mul(&diff.z, &f.sqr(&f.add(&da, &cb)));
        let nz = f.mul(&diff.x, &f.sqr(&f.sub(&da, &cb)));
        MontPoint { x: nx, z: nz }
    }

    /// Montgomery ladder. The pair `(b, a)` walks the bits of `k` holding
    /// `a - b = p` throughout, so every addition is differential against `p`.
    pub fn mul(&self, p: &MontPoint, k: &BigInt) -> MontPoint {
        // n > 1 is asserted at construction.
        let k = k.umod(&self.n).unwrap();
        let mut a = p.clone();
        let mut b = self.infinity();
        for i in (0..k.bit_len()).rev() {
            if k.bit(i) {
                b = self.diff_add(&b, &a, p);
                a = self.dbl(&a);
            } else {
                a = self.diff_add(&a, &b, p);
                b = self.dbl(&b);
            }
        }
        b
    }
}
