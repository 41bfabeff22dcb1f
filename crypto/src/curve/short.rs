//! Short Weierstrass curves `y^2 = x^3 + a*x + b` over a prime field.
//!
//! Group arithmetic runs in Jacobian coordinates with affine tables for the
//! mixed additions. Doubling dispatches on the shape of `a`: the `a = 0` and
//! `a = -3` special cases each save field multiplications over the general
//! formula. Scalar multiplication is width-4 wNAF, with a fixed-base table
//! for the generator and an optional GLV endomorphism decomposition.

use crate::curve::wnaf;
use crate::Error;
use alloc::vec::Vec;
use bignum::{BigInt, ReduceCtx, Reduced};
use core::cmp::Ordering;

const WNAF_WIDTH: u32 = 4;

/// Affine point; `inf` marks the group identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub(crate) x: Reduced,
    pub(crate) y: Reduced,
    pub(crate) inf: bool,
}

impl Point {
    pub fn is_infinity(&self) -> bool {
        self.inf
    }
}

/// Jacobian point `(X : Y : Z)` with `x = X/Z^2`, `y = Y/Z^3`. `Z = 0` is
/// the identity.
#[derive(Clone, Debug)]
pub struct JPoint {
    x: Reduced,
    y: Reduced,
    z: Reduced,
}

impl JPoint {
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }
}

enum CoeffA {
    Zero,
    MinusThree,
    General,
}

/// GLV decomposition data: an order-3 field automorphism `(x, y) -> (beta*x, y)`
/// that acts on the group as scalar multiplication, plus a reduced lattice
/// basis for splitting scalars into two half-length parts.
pub(crate) struct Endo {
    beta: Reduced,
    basis: [(BigInt, BigInt); 2],
}

pub struct ShortCurve {
    pub(crate) field: ReduceCtx,
    pub(crate) n: BigInt,
    /// `n >> 1`, the low-s boundary for canonical signatures.
    pub(crate) nh: BigInt,
    a: Reduced,
    b: Reduced,
    coeff: CoeffA,
    g: Point,
    /// `g_doubles[i] = 2^i * G`, for fixed-base multiplication.
    g_doubles: Vec<Point>,
    endo: Option<Endo>,
}

impl ShortCurve {
    pub fn new(p: BigInt, a: BigInt, b: BigInt, n: BigInt, gx: BigInt, gy: BigInt) -> Self {
        assert!(!n.is_negative() && !n.is_zero() && !n.is_one());
        let field = ReduceCtx::new(p);
        let a = field.enter(&a);
        let b = field.enter(&b);
        let coeff = if a.is_zero() {
            CoeffA::Zero
        } else if field.add(&a, &field.enter_u64(3)).is_zero() {
            CoeffA::MinusThree
        } else {
            CoeffA::General
        };
        let g = Point {
            x: field.enter(&gx),
            y: field.enter(&gy),
            inf: false,
        };
        let nh = n.shr(1);
        let mut curve = Self {
            field,
            n,
            nh,
            a,
            b,
            coeff,
            g,
            g_doubles: Vec::new(),
            endo: None,
        };
        curve.g_doubles = curve.doubles_of(&curve.g.clone());
        curve
    }

    pub(crate) fn set_endo(
        &mut self,
        beta: BigInt,
        lambda: BigInt,
        basis: [(BigInt, BigInt); 2],
    ) {
        let beta = self.field.enter(&beta);
        // the automorphism must act on the generator as multiplication
        // by lambda
        debug_assert!({
            let phi_g = Point {
                x: self.field.mul(&self.g.x, &beta),
                y: self.g.y.clone(),
                inf: false,
            };
            let lambda_g = self.to_affine(&self.wnaf_mul(&self.g, &lambda));
            self.eq(&lambda_g, &phi_g)
        });
        self.endo = Some(Endo { beta, basis });
    }

    pub fn generator(&self) -> &Point {
        &self.g
    }

    pub fn order(&self) -> &BigInt {
        &self.n
    }

    pub fn field_modulus(&self) -> &BigInt {
        self.field.modulus()
    }

    pub fn infinity(&self) -> Point {
        Point {
            x: self.field.zero(),
            y: self.field.zero(),
            inf: true,
        }
    }

    /// Affine coordinates as plain integers; `None` for the identity.
    pub fn affine(&self, p: &Point) -> Option<(BigInt, BigInt)> {
        if p.inf {
            return None;
        }
        Some((self.field.exit(&p.x), self.field.exit(&p.y)))
    }

    pub fn point_from_affine(&self, x: &BigInt, y: &BigInt) -> Result<Point, Error> {
        let m = self.field.modulus();
        if x.is_negative()
            || y.is_negative()
            || x.ucmp(m) != Ordering::Less
            || y.ucmp(m) != Ordering::Less
        {
            return Err(Error::InvalidEncoding);
        }
        let p = Point {
            x: self.field.enter(x),
            y: self.field.enter(y),
            inf: false,
        };
        if !self.validate(&p) {
            return Err(Error::InvalidPoint);
        }
        Ok(p)
    }

    /// Lifts an x coordinate onto the curve, choosing the root with the
    /// requested y parity. Fails when `x^3 + ax + b` is a non-residue.
    pub fn point_from_x(&self, x: &BigInt, odd: bool) -> Result<Point, Error> {
        let f = &self.field;
        if x.is_negative() || x.ucmp(f.modulus()) != Ordering::Less {
            return Err(Error::InvalidEncoding);
        }
        let xr = f.enter(x);
        let y2 = f.add(
            &f.add(&f.mul(&f.sqr(&xr), &xr), &f.mul(&self.a, &xr)),
            &self.b,
        );
        let y = f.sqrt(&y2).ok_or(Error::InvalidPoint)?;
        let y = if f.exit(&y).is_odd() != odd { f.neg(&y) } else { y };
        Ok(Point { x: xr, y, inf: false })
    }

    /// Curve-equation membership test. The identity passes by convention.
    pub fn validate(&self, p: &Point) -> bool {
        if p.inf {
            return true;
        }
        let f = &self.field;
        let lhs = f.sqr(&p.y);
        let rhs = f.add(
            &f.add(&f.mul(&f.sqr(&p.x), &p.x), &f.mul(&self.a, &p.x)),
            &self.b,
        );
        lhs == rhs
    }

    pub fn neg(&self, p: &Point) -> Point {
        if p.inf {
            return p.clone();
        }
        Point {
            x: p.x.clone(),
            y: self.field.neg(&p.y),
            inf: false,
        }
    }

    pub fn add(&self, p: &Point, q: &Point) -> Point {
        self.to_affine(&self.jmadd(&self.to_jacobian(p), q))
    }

    pub fn dbl(&self, p: &Point) -> Point {
        self.to_affine(&self.jdbl(&self.to_jacobian(p)))
    }

    pub fn eq(&self, p: &Point, q: &Point) -> bool {
        p.inf == q.inf && (p.inf || (p.x == q.x && p.y == q.y))
    }

    // ---- SEC1 point codec ----

    /// Octet-string encoding: `04 || x || y` uncompressed, `02/03 || x`
    /// compressed with the tag carrying the parity of y.
    pub fn encode_point(&self, p: &Point, compress: bool) -> Vec<u8> {
        assert!(!p.inf, "cannot encode the point at infinity");
        let blen = self.field.modulus().byte_len();
        let f = &self.field;
        let x = f.exit(&p.x);
        let y = f.exit(&p.y);
        let xb = x.to_bytes_be(blen).unwrap();
        let mut out = Vec::with_capacity(1 + 2 * blen);
        if compress {
            out.push(if y.is_odd() { 0x03 } else { 0x02 });
            out.extend_from_slice(&xb);
        } else {
            out.push(0x04);
            out.extend_from_slice(&xb);
            out.extend_from_slice(&y.to_bytes_be(blen).unwrap());
        }
        out
    }

    /// Accepts compressed (02/03), uncompressed (04) and hybrid (06/07)
    /// forms, rejecting out-of-field coordinates and off-curve points.
    pub fn decode_point(&self, bytes: &[u8]) -> Result<Point, Error> {
        let blen = self.field.modulus().byte_len();
        match bytes.first() {
            Some(tag @ (0x02 | 0x03)) if bytes.len() == 1 + blen => {
                let x = BigInt::from_bytes_be(&bytes[1..]);
                self.point_from_x(&x, *tag == 0x03)
            }
            Some(tag @ (0x04 | 0x06 | 0x07)) if bytes.len() == 1 + 2 * blen => {
                let x = BigInt::from_bytes_be(&bytes[1..1 + blen]);
                let y = BigInt::from_bytes_be(&bytes[1 + blen..]);
                if *tag != 0x04 && y.is_odd() != (*tag == 0x07) {
                    return Err(Error::InvalidEncoding);
                }
                self.point_from_affine(&x, &y)
            }
            _ => Err(Error::InvalidEncoding),
        }
    }

    // ---- Jacobian arithmetic ----

    pub(crate) fn jinfinity(&self) -> JPoint {
        JPoint {
            x: self.field.one(),
            y: self.field.one(),
            z: self.field.zero(),
        }
    }

    pub(crate) fn to_jacobian(&self, p: &Point) -> JPoint {
        if p.inf {
            return self.jinfinity();
        }
        JPoint {
            x: p.x.clone(),
            y: p.y.clone(),
            z: self.field.one(),
        }
    }

    pub(crate) fn to_affine(&self, j: &JPoint) -> Point {
        if j.is_infinity() {
            return self.infinity();
        }
        let f = &self.field;
        let zinv = f.invert(&j.z);
        let zinv2 = f.sqr(&zinv);
        Point {
            x: f.mul(&j.x, &zinv2),
            y: f.mul(&f.mul(&j.y, &zinv2), &zinv),
            inf: false,
        }
    }

    pub(crate) fn jdbl(&self, p: &JPoint) -> JPoint {
        if p.is_infinity() {
            return p.clone();
        }
        match self.coeff {
            CoeffA::Zero => self.jdbl_a0(p),
            CoeffA::MinusThree => self.jdbl_a3(p),
            CoeffA::General => self.jdbl_generic(p),
        }
    }

    // https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian-0.html#doubling-dbl-2009-l
    fn jdbl_a0(&self, p: &JPoint) -> JPoint {
        let f = &self.field;
        let a = f.sqr(&p.x);
        let b = f.sqr(&p.y);
        let c = f.sqr(&b);
        let d = f.double(&f.sub(&f.sub(&f.sqr(&f.add(&p.x, &b)), &a), &c));
        let e = f.add(&f.double(&a), &a);
        let ee = f.sqr(&e);
        let x3 = f.sub(&ee, &f.double(&d));
        let c8 = f.double(&f.double(&f.double(&c)));
        let y3 = f.sub(&f.mul(&e, &f.sub(&d, &x3)), &c8);
        let z3 = f.double(&f.mul(&p.y, &p.z));
        JPoint { x: x3, y: y3, z: z3 }
    }

    // https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian-3.html#doubling-dbl-2001-b
    fn jdbl_a3(&self, p: &JPoint) -> JPoint {
        let f = &self.field;
        let delta = f.sqr(&p.z);
        let gamma = f.sqr(&p.y);
        let beta = f.mul(&p.x, &gamma);
        let t = f.mul(&f.sub(&p.x, &delta), &f.add(&p.x, &delta));
        let alpha = f.add(&f.double(&t), &t);
        let beta4 = f.double(&f.double(&beta));
        let x3 = f.sub(&f.sqr(&alpha), &f.double(&beta4));
        let z3 = f.sub(
            &f.sub(&f.sqr(&f.add(&p.y, &p.z)), &gamma),
            &delta,
        );
        let g8 = f.double(&f.double(&f.double(&f.sqr(&gamma))));
        let y3 = f.sub(&f.mul(&alpha, &f.sub(&beta4, &x3)), &g8);
        JPoint { x: x3, y: y3, z: z3 }
    }

    // https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian.html#doubling-dbl-2007-bl
    fn jdbl_generic(&self, p: &JPoint) -> JPoint {
        let f = &self.field;
        let xx = f.sqr(&p.x);
        let yy = f.sqr(&p.y);
        let yyyy = f.sqr(&yy);
        let zz = f.sqr(&p.z);
        let s = f.double(&f.sub(
            &f.sub(&f.sqr(&f.add(&p.x, &yy)), &xx),
            &yyyy,
        ));
        let m = f.add(
            &f.add(&f.double(&xx), &xx),
            &f.mul(&self.a, &f.sqr(&zz)),
        );
        let x3 = f.sub(&f.sqr(&m), &f.double(&s));
        let y8 = f.double(&f.double(&f.double(&yyyy)));
        let y3 = f.sub(&f.mul(&m, &f.sub(&s, &x3)), &y8);
        let z3 = f.sub(&f.sub(&f.sqr(&f.add(&p.y, &p.z)), &yy), &zz);
        JPoint { x: x3, y: y3, z: z3 }
    }

    pub(crate) fn jadd(&self, p: &JPoint, q: &JPoint) -> JPoint {
        if p.is_infinity() {
            return q.clone();
        }
        if q.is_infinity() {
            return p.clone();
        }
        let f = &self.field;
        let z1z1 = f.sqr(&p.z);
        let z2z2 = f.sqr(&q.z);
        let u1 = f.mul(&p.x, &z2z2);
        let u2 = f.mul(&q.x, &z1z1);
        let s1 = f.mul(&f.mul(&p.y, &q.z), &z2z2);
        let s2 = f.mul(&f.mul(&q.y, &p.z), &z1z1);
        let h = f.sub(&u2, &u1);
        let r = f.sub(&s2, &s1);
        if h.is_zero() {
            return if r.is_zero() {
                self.jdbl(p)
            } else {
                self.jinfinity()
            };
        }
        let h2 = f.sqr(&h);
        let h3 = f.mul(&h2, &h);
        let v = f.mul(&u1, &h2);
        let x3 = f.sub(&f.sub(&f.sqr(&r), &h3), &f.double(&v));
        let y3 = f.sub(&f.mul(&r, &f.sub(&v, &x3)), &f.mul(&s1, &h3));
        let z3 = f.mul(&f.mul(&p.z, &q.z), &h);
        JPoint { x: x3, y: y3, z: z3 }
    }

    /// Mixed addition with an affine second operand (implicit `Z2 = 1`).
    pub(crate) fn jmadd(&self, p: &JPoint, q: &Point) -> JPoint {
        if q.inf {
            return p.clone();
        }
        if p.is_infinity() {
            return self.to_jacobian(q);
        }
        let f = &self.field;
        let z1z1 = f.sqr(&p.z);
        let u2 = f.mul(&q.x, &z1z1);
        let s2 = f.mul(&f.mul(&q.y, &p.z), &z1z1);
        let h = f.sub(&u2, &p.x);
        let r = f.sub(&s2, &p.y);
        if h.is_zero() {
            return if r.is_zero() {
                self.jdbl(p)
            } else {
                self.jinfinity()
            };
        }
        let h2 = f.sqr(&h);
        let h3 = f.mul(&h2, &h);
        let v = f.mul(&p.x, &h2);
        let x3 = f.sub(&f.sub(&f.sqr(&r), &h3), &f.double(&v));
        let y3 = f.sub(&f.mul(&r, &f.sub(&v, &x3)), &f.mul(&p.y, &h3));
        let z3 = f.mul(&p.z, &h);
        JPoint { x: x3, y: y3, z: z3 }
    }

    // ---- Scalar multiplication ----

    pub fn mul(&self, p: &Point, k: &BigInt) -> Point {
        let k = self.reduce_scalar(k);
        if k.is_zero() || p.inf {
            return self.infinity();
        }
        let j = if self.endo.is_some() {
            self.endo_mul(p, &k)
        } else {
            self.wnaf_mul(p, &k)
        };
        self.to_affine(&j)
    }

    /// Fixed-base multiplication of the generator using the precomputed
    /// doubles table: the NAF digits select `+/- 2^i G` terms, so the loop
    /// is mixed additions only.
    pub fn mul_g(&self, k: &BigInt) -> Point {
        let k = self.reduce_scalar(k);
        let mut acc = self.jinfinity();
        for (i, &d) in wnaf::naf(&k).iter().enumerate() {
            if d > 0 {
                acc = self.jmadd(&acc, &self.g_doubles[i]);
            } else if d < 0 {
                acc = self.jmadd(&acc, &self.neg(&self.g_doubles[i]));
            }
        }
        self.to_affine(&acc)
    }

    /// `k1*P1 + k2*P2` with shared doublings; both scalars non-negative.
    pub fn mul_add(&self, k1: &BigInt, p1: &Point, k2: &BigInt, p2: &Point) -> Point {
        self.to_affine(&self.jmul_add(k1, p1, k2, p2))
    }

    fn reduce_scalar(&self, k: &BigInt) -> BigInt {
        // n > 1 is asserted at construction.
        k.umod(&self.n).unwrap()
    }

    fn doubles_of(&self, p: &Point) -> Vec<Point> {
        let count = self.n.bit_len() as usize + 2;
        let mut out = Vec::with_capacity(count);
        let mut acc = self.to_jacobian(p);
        for _ in 0..count {
            out.push(self.to_affine(&acc));
            acc = self.jdbl(&acc);
        }
        out
    }

    fn odd_multiples(&self, p: &Point, w: u32) -> Vec<Point> {
        let count = 1usize << (w - 1);
        let mut out = Vec::with_capacity(count);
        out.push(p.clone());
        let two_p = self.jdbl(&self.to_jacobian(p));
        let mut acc = self.to_jacobian(p);
        for _ in 1..count {
            acc = self.jadd(&acc, &two_p);
            out.push(self.to_affine(&acc));
        }
        out
    }

    fn wnaf_mul(&self, p: &Point, k: &BigInt) -> JPoint {
        let table = self.odd_multiples(p, WNAF_WIDTH);
        let digits = wnaf::recode(k, WNAF_WIDTH);
        let mut acc = self.jinfinity();
        for &d in digits.iter().rev() {
            acc = self.jdbl(&acc);
            if d > 0 {
                acc = self.jmadd(&acc, &table[(d as usize - 1) / 2]);
            } else if d < 0 {
                acc = self.jmadd(&acc, &self.neg(&table[((-d) as usize - 1) / 2]));
            }
        }
        acc
    }

    /// Interleaved double multiplication driven by the joint sparse form.
    /// The four signed combinations of `{P1, P2}` are precomputed as affine
    /// points so every addition in the loop is mixed.
    pub(crate) fn jmul_add(
        &self,
        k1: &BigInt,
        p1: &Point,
        k2: &BigInt,
        p2: &Point,
    ) -> JPoint {
        let sum = self.to_affine(&self.jmadd(&self.to_jacobian(p1), p2));
        let diff = self.to_affine(&self.jmadd(&self.to_jacobian(p1), &self.neg(p2)));
        let [u1, u2] = wnaf::jsf(k1, k2);
        let mut acc = self.jinfinity();
        for i in (0..u1.len()).rev() {
            acc = self.jdbl(&acc);
            acc = match (u1[i], u2[i]) {
                (0, 0) => acc,
                (1, 0) => self.jmadd(&acc, p1),
                (-1, 0) => self.jmadd(&acc, &self.neg(p1)),
                (0, 1) => self.jmadd(&acc, p2),
                (0, -1) => self.jmadd(&acc, &self.neg(p2)),
                (1, 1) => self.jmadd(&acc, &sum),
                (-1, -1) => self.jmadd(&acc, &self.neg(&sum)),
                (1, -1) => self.jmadd(&acc, &diff),
                (-1, 1) => self.jmadd(&acc, &self.neg(&diff)),
                _ => unreachable!("jsf digits are in -1..=1"),
            };
        }
        acc
    }

    /// GLV: split `k = k1 + k2*lambda mod n` into half-length parts, map the
    /// second through the endomorphism, and finish with a joint double
    /// multiplication.
    fn endo_mul(&self, p: &Point, k: &BigInt) -> JPoint {
        let Some(endo) = &self.endo else {
            return self.wnaf_mul(p, k);
        };
        let (mut k1, mut k2) = self.endo_split(k, endo);
        let mut p1 = p.clone();
        let mut p2 = Point {
            x: self.field.mul(&p.x, &endo.beta),
            y: p.y.clone(),
            inf: false,
        };
        if k1.is_negative() {
            k1.negate();
            p1 = self.neg(&p1);
        }
        if k2.is_negative() {
            k2.negate();
            p2 = self.neg(&p2);
        }
        self.jmul_add(&k1, &p1, &k2, &p2)
    }

    /// Babai rounding against the lattice basis: the returned pair satisfies
    /// `k1 + k2*lambda = k mod n` with both parts about half the width of n.
    fn endo_split(&self, k: &BigInt, endo: &Endo) -> (BigInt, BigInt) {
        let (a1, b1) = &endo.basis[0];
        let (a2, b2) = &endo.basis[1];
        // n > 1 is asserted at construction.
        let c1 = (b2 * k).div_round(&self.n).unwrap();
        let c2 = (&b1.neg() * k).div_round(&self.n).unwrap();
        let p1 = &(&c1 * a1) + &(&c2 * a2);
        let q1 = &(&c1 * b1) + &(&c2 * b2);
        let k1 = k - &p1;
        let k2 = q1.neg();
        (k1, k2)
    }

    /// Whether the Jacobian point's affine x equals `x` mod n, without
    /// leaving projective coordinates. The scalar `x` is below n, so each
    /// candidate lift `x + t*n` below p has to be tried.
    pub(crate) fn eq_x_to_p(&self, j: &JPoint, x: &BigInt) -> bool {
        debug_assert!(!j.is_infinity());
        let f = &self.field;
        let zz = f.sqr(&j.z);
        let mut rx = f.mul(&f.enter(x), &zz);
        if rx == j.x {
            return true;
        }
        let t = f.mul(&f.enter(&self.n), &zz);
        let mut xc = x.clone();
        loop {
            xc.add_assign(&self.n);
            if xc.ucmp(f.modulus()) != Ordering::Less {
                return false;
            }
            rx = f.add(&rx, &t);
            if rx == j.x {
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // y^2 = x^3 + 2x + 3 over F_97, generator (3, 6), order 5.
    fn tiny() -> ShortCurve {
        ShortCurve::new(
            BigInt::from_u64(97),
            BigInt::from_u64(2),
            BigInt::from_u64(3),
            BigInt::from_u64(5),
            BigInt::from_u64(3),
            BigInt::from_u64(6),
        )
    }

    #[test]
    fn generator_is_on_curve() {
        let c = tiny();
        assert!(c.validate(c.generator()));
        assert!(c
            .point_from_affine(&BigInt::from_u64(3), &BigInt::from_u64(7))
            .is_err());
    }

    #[test]
    fn order_annihilates_generator() {
        let c = tiny();
        let p = c.mul(c.generator(), &BigInt::from_u64(5));
        assert!(p.is_infinity());
        let p = c.mul_g(&BigInt::from_u64(5));
        assert!(p.is_infinity());
    }

    #[test]
    fn small_multiples_agree_with_repeated_addition() {
        let c = tiny();
        let g = c.generator().clone();
        let mut acc = c.infinity();
        for k in 1u64..=10 {
            acc = c.add(&acc, &g);
            assert!(c.eq(&acc, &c.mul(&g, &BigInt::from_u64(k))), "k = {k}");
            assert!(c.eq(&acc, &c.mul_g(&BigInt::from_u64(k))), "fixed base k = {k}");
        }
    }

    #[test]
    fn dbl_matches_self_add() {
        let c = tiny();
        let g = c.generator();
        assert!(c.eq(&c.dbl(g), &c.add(g, g)));
    }

    #[test]
    fn add_inverse_is_identity() {
        let c = tiny();
        let g = c.generator();
        assert!(c.add(g, &c.neg(g)).is_infinity());
        assert!(c.eq(&c.add(g, &c.infinity()), g));
    }

    #[test]
    fn mul_add_matches_separate_muls() {
        let c = tiny();
        let g = c.generator().clone();
        let q = c.dbl(&g);
        for (k1, k2) in [(1u64, 1u64), (2, 3), (4, 1), (3, 3), (0, 2)] {
            let joint = c.mul_add(&BigInt::from_u64(k1), &g, &BigInt::from_u64(k2), &q);
            let split = c.add(
                &c.mul(&g, &BigInt::from_u64(k1)),
                &c.mul(&q, &BigInt::from_u64(k2)),
            );
            assert!(c.eq(&joint, &split), "({k1}, {k2})");
        }
    }

    #[test]
    fn point_from_x_recovers_both_parities() {
        let c = tiny();
        let (x, y) = c.affine(c.generator()).unwrap();
        let even_odd = y.is_odd();
        let p = c.point_from_x(&x, even_odd).unwrap();
        assert!(c.eq(&p, c.generator()));
        let q = c.point_from_x(&x, !even_odd).unwrap();
        assert!(c.eq(&q, &c.neg(c.generator())));
    }
}
