//! Twisted Edwards curves `a*x^2 + y^2 = 1 + d*x^2*y^2` in extended
//! coordinates `(X : Y : Z : T)` with `T = X*Y/Z`. The unified add/double
//! formulas have no exceptional cases for `a` square and `d` non-square,
//! which holds for every parameter set shipped here.

use crate::curve::wnaf;
use crate::Error;
use alloc::vec::Vec;
use bignum::{BigInt, ReduceCtx, Reduced};
use core::cmp::Ordering;

const WNAF_WIDTH: u32 = 4;

#[derive(Clone)]
pub struct EdPoint {
    x: Reduced,
    y: Reduced,
    z: Reduced,
    t: Reduced,
}

impl EdPoint {
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == self.z
    }
}

pub struct EdwardsCurve {
    field: ReduceCtx,
    n: BigInt,
    a: Reduced,
    d: Reduced,
    g: EdPoint,
}

impl EdwardsCurve {
    pub fn new(p: BigInt, a: BigInt, d: BigInt, n: BigInt, gx: BigInt, gy: BigInt) -> Self {
        assert!(!n.is_negative() && !n.is_zero() && !n.is_one());
        let field = ReduceCtx::new(p);
        let a = field.enter(&a);
        let d = field.enter(&d);
        let gx = field.enter(&gx);
        let gy = field.enter(&gy);
        let g = EdPoint {
            t: field.mul(&gx, &gy),
            x: gx,
            y: gy,
            z: field.one(),
        };
        Self { field, n, a, d, g }
    }

    pub fn generator(&self) -> &EdPoint {
        &self.g
    }

    pub fn order(&self) -> &BigInt {
        &self.n
    }

    pub fn identity(&self) -> EdPoint {
        EdPoint {
            x: self.field.zero(),
            y: self.field.one(),
            z: self.field.one(),
            t: self.field.zero(),
        }
    }

    pub fn point_from_affine(&self, x: &BigInt, y: &BigInt) -> Result<EdPoint, Error> {
        let m = self.field.modulus();
        if x.is_negative()
            || y.is_negative()
            || x.ucmp(m) != Ordering::Less
            || y.ucmp(m) != Ordering::Less
        {
            return Err(Error::InvalidEncoding);
        }
        let xr = self.field.enter(x);
        let yr = self.field.enter(y);
        let p = EdPoint {
            t: self.field.mul(&xr, &yr),
            x: xr,
            y: yr,
            z: self.field.one(),
        };
        if !self.validate(&p) {
            return Err(Error::InvalidPoint);
        }
        Ok(p)
    }

    pub fn affine(&self, p: &EdPoint) -> (BigInt, BigInt) {
        let f = &self.field;
        let zinv = f.invert(&p.z);
        (f.exit(&f.mul(&p.x, &zinv)), f.exit(&f.mul(&p.y, &zinv)))
    }

    /// Curve-equation membership in affine form.
    pub fn validate(&self, p: &EdPoint) -> bool {
        let f = &self.field;
        let (x, y) = self.affine(p);
        let x = f.enter(&x);
        let y = f.enter(&y);
        let x2 = f.sqr(&x);
        let y2 = f.sqr(&y);
        let lhs = f.add(&f.mul(&self.a, &x2), &y2);
        let rhs = f.add(&f.one(), &f.mul(&f.mul(&self.d, &x2), &y2));
        lhs == rhs
    }

    pub fn eq(&self, p: &EdPoint, q: &EdPoint) -> bool {
        let f = &self.field;
        f.mul(&p.x, &q.z) == f.mul(&q.x, &p.z) && f.mul(&p.y, &q.z) == f.mul(&q.y, &p.z)
    }

    pub fn neg(&self, p: &EdPoint) -> EdPoint {
        let f = &self.field;
        EdPoint {
            x: f.neg(&p.x),
            y: p.y.clone(),
            z: p.z.clone(),
            t: f.neg(&p.t),
        }
    }

    // https://hyperelliptic.org/EFD/g1p/auto-twisted-extended.html#addition-add-2008-hwcd
    pub fn add(&self, p: &EdPoint, q: &EdPoint) -> EdPoint {
        let f = &self.field;
        let a = f.mul(&p.x, &q.x);
        let b = f.mul(&p.y, &q.y);
        let c = f.mul(&f.mul(&p.t, &self.d), &q.t);
        let d = f.mul(&p.z, &q.z);
        let e = f.sub(
            &f.sub(&f.mul(&f.add(&p.x, &p.y), &f.add(&q.x, &q.y)), &a),
            &b,
        );
        let ff = f.sub(&d, &c);
        let g = f.add(&d, &c);
        let h = f.sub(&b, &f.mul(&self.a, &a));
        EdPoint {
            x: f.mul(&e, &ff),
            y: f.mul(&g, &h),
            z: f.mul(&ff, &g),
            t: f.mul(&e, &h),
        }
    }

    // https://hyperelliptic.org/EFD/g1p/auto-twisted-extended.html#doubling-dbl-2008-hwcd
    pub fn dbl(&self, p: &EdPoint) -> EdPoint {
        let f = &self.field;
        let a = f.sqr(&p.x);
        let b = f.sqr(&p.y);
        let c = f.double(&f.sqr(&p.z));
        let d = f.mul(&self.a, &a);
        let e = f.sub(&f.sub(&f.sqr(&f.add(&p.x, &p.y)), &a), &b);
        let g = f.add(&d, &b);
        let ff = f.sub(&g, &c);
        let h = f.sub(&d, &b);
        EdPoint {
            x: f.mul(&e, &ff),
            y: f.mul(&g, &h),
            z: f.mul(&ff, &g),
            t: f.mul(&e, &h),
        }
    }

    /// Width-4 wNAF multiplication over an odd-multiples table.
    pub fn mul(&self, p: &EdPoint, k: &BigInt) -> EdPoint {
        // n > 1 is asserted at construction.
        let k = k.umod(&self.n).unwrap();
        let count = 1usize << (WNAF_WIDTH - 1);
        let mut table = Vec::with_capacity(count);
        table.push(p.clone());
        let two_p = self.dbl(p);
        for i in 1..count {
            table.push(self.add(&table[i - 1], &two_p));
        }
        let mut acc = self.identity();
        for &d in wnaf::recode(&k, WNAF_WIDTH).iter().rev() {
            acc = self.dbl(&acc);
            if d > 0 {
                acc = self.add(&acc, &table[(d as usize - 1) / 2]);
            } else if d < 0 {
                acc = self.add(&acc, &self.neg(&table[((-d) as usize - 1) / 2]));
            }
        }
        acc
    }

    // ---- compressed codec ----

    fn encoded_len(&self) -> usize {
        // one spare bit above the field for the sign of x
        (self.field.modulus().bit_len() as usize + 8) / 8
    }

    /// Little-endian y with the parity of x in the top bit.
    pub fn encode_point(&self, p: &EdPoint) -> Vec<u8> {
        let (x, y) = self.affine(p);
        let blen = self.encoded_len();
        // y < p always fits the encoded width
        let mut out = y.to_bytes_le(blen).unwrap();
        if x.is_odd() {
            out[blen - 1] |= 0x80;
        }
        out
    }

    pub fn decode_point(&self, bytes: &[u8]) -> Result<EdPoint, Error> {
        let blen = self.encoded_len();
        if bytes.len() != blen {
            return Err(Error::InvalidEncoding);
        }
        let mut buf = bytes.to_vec();
        let x_odd = buf[blen - 1] & 0x80 != 0;
        buf[blen - 1] &= 0x7f;
        let y = BigInt::from_bytes_le(&buf);
        if y.ucmp(self.field.modulus()) != Ordering::Less {
            return Err(Error::InvalidEncoding);
        }
        let x = self.recover_x(&y, x_odd)?;
        let f = &self.field;
        let yr = f.enter(&y);
        Ok(EdPoint {
            t: f.mul(&x, &yr),
            x,
            y: yr,
            z: f.one(),
        })
    }

    /// Solves `x^2 = (y^2 - 1) / (d*y^2 - a)` and picks the root with the
    /// requested parity.
    fn recover_x(&self, y: &BigInt, odd: bool) -> Result<Reduced, Error> {
        let f = &self.field;
        let y2 = f.sqr(&f.enter(y));
        let num = f.sub(&y2, &f.one());
        let den = f.sub(&f.mul(&self.d, &y2), &self.a);
        let x2 = f.mul(&num, &f.invert(&den));
        let x = f.sqrt(&x2).ok_or(Error::InvalidPoint)?;
        if x.is_zero() && odd {
            return Err(Error::InvalidPoint);
        }
        Ok(if f.exit(&x).is_odd() != odd {
            f.neg(&x)
        } else {
            x
        })
    }
}
