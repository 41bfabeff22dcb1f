//! Modular-reduction contexts.
//!
//! A [`ReduceCtx`] binds a modulus together with the precomputed constants of
//! one of three reduction strategies: generic reduce-by-division, the
//! pseudo-Mersenne fast path for moduli of the form `2^n - k`, and full
//! Montgomery REDC for arbitrary odd moduli. Values inside a context are
//! wrapped in [`Reduced`] and tagged with the context id; mixing values from
//! different contexts is a programmer error and fails fast.

use crate::BigInt;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};

static NEXT_CTX_ID: AtomicU32 = AtomicU32::new(1);

/// A value in some context's reduced representation, in `[0, m)`.
/// For Montgomery contexts this is the `x*R mod m` form.
#[derive(Clone, PartialEq, Eq)]
pub struct Reduced {
    value: BigInt,
    ctx: u32,
}

impl Reduced {
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// The raw reduced representation; Montgomery callers usually want
    /// [`ReduceCtx::exit`] instead.
    pub fn raw(&self) -> &BigInt {
        &self.value
    }
}

impl core::fmt::Debug for Reduced {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Reduced({:?} @{})", self.value, self.ctx)
    }
}

enum Strategy {
    /// Reduce on demand via division.
    Generic,
    /// Modulus of the form `2^n - k`; reduce by iterated fold of the high
    /// part, `x <- lo + hi*k`.
    Mersenne { n: u32, k: BigInt },
    /// Montgomery REDC with `R = 2^shift`.
    Montgomery {
        shift: u32,
        r2: BigInt,
        minv: BigInt,
    },
}

pub struct ReduceCtx {
    id: u32,
    m: BigInt,
    strategy: Strategy,
}

impl ReduceCtx {
    /// Picks the fastest strategy for `m`: pseudo-Mersenne when the shape
    /// admits it, Montgomery for other odd moduli, generic otherwise.
    pub fn new(m: BigInt) -> Self {
        if let Some((n, k)) = mersenne_params(&m) {
            return Self::with_strategy(m, Strategy::Mersenne { n, k });
        }
        if m.is_odd() {
            return Self::montgomery(m);
        }
        Self::generic(m)
    }

    pub fn generic(m: BigInt) -> Self {
        Self::with_strategy(m, Strategy::Generic)
    }

    /// Montgomery context; `m` must be odd and greater than one.
    pub fn montgomery(m: BigInt) -> Self {
        assert!(m.is_odd(), "montgomery reduction requires an odd modulus");
        let shift = ((m.bit_len() + 63) / 64) * 64;
        let r = BigInt::one().shl(shift);
        let r_mod_m = r.umod(&m).unwrap();
        let r2 = (&r_mod_m * &r_mod_m).umod(&m).unwrap();
        let rinv = r_mod_m.invmp(&m);
        // minv = (R*Rinv - 1)/m mod R  ==  -m^-1 mod R
        let mut t = &r * &rinv;
        t.sub_assign(&BigInt::one());
        let minv = t.div(&m).unwrap().umod(&r).unwrap();
        Self::with_strategy(
            m,
            Strategy::Montgomery { shift, r2, minv },
        )
    }

    /// Pseudo-Mersenne context for a modulus known to be `2^n - k`.
    pub fn mersenne(m: BigInt) -> Self {
        let (n, k) = mersenne_params(&m).expect("modulus is not of pseudo-Mersenne shape");
        Self::with_strategy(m, Strategy::Mersenne { n, k })
    }

    fn with_strategy(m: BigInt, strategy: Strategy) -> Self {
        assert!(
            !m.is_negative() && !m.is_zero() && !m.is_one(),
            "modulus must be greater than one"
        );
        let id = NEXT_CTX_ID.fetch_add(1, Ordering::Relaxed);
        Self { id, m, strategy }
    }

    pub fn modulus(&self) -> &BigInt {
        &self.m
    }

    fn check(&self, a: &Reduced) {
        assert!(
            a.ctx == self.id,
            "reduce context mismatch: value belongs to context {}, operation on context {}",
            a.ctx,
            self.id
        );
    }

    fn wrap(&self, value: BigInt) -> Reduced {
        debug_assert!(!value.is_negative() && value.ucmp(&self.m) == core::cmp::Ordering::Less);
        Reduced {
            value,
            ctx: self.id,
        }
    }

    /// Brings a plain value into this context's reduced representation.
    pub fn enter(&self, x: &BigInt) -> Reduced {
        let x = self.reduce_plain(x);
        match &self.strategy {
            Strategy::Montgomery { r2, .. } => self.wrap(self.redc(&x * r2)),
            _ => self.wrap(x),
        }
    }

    pub fn enter_u64(&self, x: u64) -> Reduced {
        self.enter(&BigInt::from_u64(x))
    }

    /// Leaves the reduced representation, clearing the context tag.
    pub fn exit(&self, a: &Reduced) -> BigInt {
        self.check(a);
        match &self.strategy {
            Strategy::Montgomery { .. } => self.redc(a.value.clone()),
            _ => a.value.clone(),
        }
    }

    pub fn zero(&self) -> Reduced {
        self.wrap(BigInt::zero())
    }

    pub fn one(&self) -> Reduced {
        self.enter(&BigInt::one())
    }

    /// Reduces an arbitrary (possibly negative) plain value into `[0, m)`.
    fn reduce_plain(&self, x: &BigInt) -> BigInt {
        if x.is_negative() {
            return x.umod(&self.m).unwrap();
        }
        match &self.strategy {
            Strategy::Mersenne { n, k } => {
                let mut v = x.clone();
                while v.bit_len() > *n {
                    let (lo, hi) = v.split_bits(*n);
                    v = &(&hi * k) + &lo;
                }
                while v.ucmp(&self.m) != core::cmp::Ordering::Less {
                    v.sub_assign(&self.m);
                }
                v
            }
            _ => x.umod(&self.m).unwrap(),
        }
    }

    pub fn add(&self, a: &Reduced, b: &Reduced) -> Reduced {
        self.check(a);
        self.check(b);
        let mut v = &a.value + &b.value;
        if v.ucmp(&self.m) != core::cmp::Ordering::Less {
            v.sub_assign(&self.m);
        }
        self.wrap(v)
    }

    pub fn sub(&self, a: &Reduced, b: &Reduced) -> Reduced {
        self.check(a);
        self.check(b);
        let mut v = &a.value - &b.value;
        if v.is_negative() {
            v.add_assign(&self.m);
        }
        self.wrap(v)
    }

    pub fn neg(&self, a: &Reduced) -> Reduced {
        self.check(a);
        if a.value.is_zero() {
            return self.zero();
        }
        self.wrap(&self.m - &a.value)
    }

    pub fn mul(&self, a: &Reduced, b: &Reduced) -> Reduced {
        self.check(a);
        self.check(b);
        let t = &a.value * &b.value;
        match &self.strategy {
            Strategy::Montgomery { .. } => self.wrap(self.redc(t)),
            _ => self.wrap(self.reduce_plain(&t)),
        }
    }

    pub fn sqr(&self, a: &Reduced) -> Reduced {
        self.mul(a, a)
    }

    /// Doubles a reduced value without a full multiplication.
    pub fn double(&self, a: &Reduced) -> Reduced {
        self.add(a, a)
    }

    /// Montgomery reduction: `t*R^-1 mod m` with one conditional correction.
    /// Requires `t < m*R`.
    fn redc(&self, t: BigInt) -> BigInt {
        let Strategy::Montgomery { shift, minv, .. } = &self.strategy else {
            unreachable!("redc outside a Montgomery context")
        };
        debug_assert!(!t.is_negative());
        // u = (t + ((t mod R)*minv mod R)*m) / R
        let mut c = t.mask_bits(*shift);
        c.mul_assign(minv);
        c.mask_bits_assign(*shift);
        c.mul_assign(&self.m);
        c.add_assign(&t);
        debug_assert_eq!(c.mask_bits(*shift), BigInt::zero());
        c.shr_assign(*shift);
        if c.ucmp(&self.m) != core::cmp::Ordering::Less {
            c.sub_assign(&self.m);
        }
        c
    }

    /// Modular exponentiation with a fixed 4-bit window.
    pub fn pow(&self, a: &Reduced, e: &BigInt) -> Reduced {
        self.check(a);
        debug_assert!(!e.is_negative());
        if e.is_zero() {
            return self.one();
        }
        let mut wnd: Vec<Reduced> = Vec::with_capacity(16);
        wnd.push(self.one());
        wnd.push(a.clone());
        for i in 2..16 {
            let prev = wnd[i - 1].clone();
            wnd.push(self.mul(&prev, a));
        }

        let windows = (e.bit_len() + 3) / 4;
        let mut res = self.one();
        let mut first = true;
        for w in (0..windows).rev() {
            if !first {
                res = self.sqr(&res);
                res = self.sqr(&res);
                res = self.sqr(&res);
                res = self.sqr(&res);
            }
            let digit = e.bits_at(w * 4, 4) as usize;
            if digit != 0 {
                res = if first {
                    wnd[digit].clone()
                } else {
                    self.mul(&res, &wnd[digit])
                };
            }
            first = false;
        }
        res
    }

    /// Modular inverse of a reduced value; returns 0 for 0.
    pub fn invert(&self, a: &Reduced) -> Reduced {
        self.check(a);
        match &self.strategy {
            Strategy::Montgomery { r2, .. } => {
                // (aR)^-1 * R^2 = a^-1 * R: one plain reduction, no REDC.
                let inv = a.value.invmp(&self.m);
                self.wrap((&inv * r2).umod(&self.m).unwrap())
            }
            _ => {
                let inv = if self.m.is_odd() {
                    a.value.invmp(&self.m)
                } else {
                    a.value.invm(&self.m).unwrap_or_else(BigInt::zero)
                };
                self.wrap(inv)
            }
        }
    }

    /// Modular square root; `None` when the value is a non-residue.
    /// Shortcut exponentiation for `m = 3 mod 4`, Tonelli-Shanks otherwise.
    pub fn sqrt(&self, a: &Reduced) -> Option<Reduced> {
        self.check(a);
        if a.is_zero() {
            return Some(self.zero());
        }

        let r = if self.m.low_u64(2) == 3 {
            let mut e = &self.m + &BigInt::one();
            e.shr_assign(2);
            self.pow(a, &e)
        } else {
            self.sqrt_tonelli_shanks(a)?
        };
        if self.sqr(&r) == *a {
            Some(r)
        } else {
            None
        }
    }

    fn sqrt_tonelli_shanks(&self, a: &Reduced) -> Option<Reduced> {
        // m - 1 = q * 2^s with q odd
        let mut q = &self.m - &BigInt::one();
        let s = q.trailing_zeros();
        q.shr_assign(s);

        let legendre_exp = (&self.m - &BigInt::one()).shr(1);
        let minus_one = self.neg(&self.one());

        // Find a quadratic non-residue z.
        let mut z_plain = 2u64;
        let z = loop {
            let cand = self.enter_u64(z_plain);
            if self.pow(&cand, &legendre_exp) == minus_one {
                break cand;
            }
            z_plain += 1;
            if z_plain > 1000 {
                // Half of all values are non-residues; this is unreachable
                // for a prime modulus.
                return None;
            }
        };

        let one = self.one();
        let mut c = self.pow(&z, &q);
        let mut r = self.pow(a, &(&q + &BigInt::one()).shr(1));
        let mut t = self.pow(a, &q);
        let mut m = s;

        while t != one {
            let mut i = 0u32;
            let mut t2 = t.clone();
            while t2 != one {
                t2 = self.sqr(&t2);
                i += 1;
                if i == m {
                    return None;
                }
            }
            let mut b = c.clone();
            for _ in 0..m - i - 1 {
                b = self.sqr(&b);
            }
            r = self.mul(&r, &b);
            c = self.sqr(&b);
            t = self.mul(&t, &c);
            m = i;
        }
        Some(r)
    }
}

/// Recognizes moduli of the form `2^n - k` where `k` is short enough for the
/// fold reduction to converge in a couple of iterations.
fn mersenne_params(m: &BigInt) -> Option<(u32, BigInt)> {
    let n = m.bit_len();
    if n < 64 {
        return None;
    }
    let k = &BigInt::one().shl(n) - m;
    if k.is_zero() || k.bit_len() * 2 > n {
        return None;
    }
    Some((n, k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(hex: &str) -> BigInt {
        BigInt::from_hex(hex).unwrap()
    }

    #[test]
    fn strategy_autodetect() {
        // secp256k1 prime: 2^256 - 2^32 - 977
        let p = b("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
        assert!(matches!(
            ReduceCtx::new(p).strategy,
            Strategy::Mersenne { n: 256, .. }
        ));
        // p256 prime is not pseudo-Mersenne; odd, so Montgomery.
        let p = b("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
        assert!(matches!(
            ReduceCtx::new(p).strategy,
            Strategy::Montgomery { .. }
        ));
        assert!(matches!(
            ReduceCtx::new(BigInt::from_u64(1 << 20)).strategy,
            Strategy::Generic
        ));
    }

    #[test]
    fn mersenne_matches_generic() {
        let p = b("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
        let fast = ReduceCtx::mersenne(p.clone());
        let slow = ReduceCtx::generic(p.clone());
        let mut state = 0x1234_5678_9abc_def0u64;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        for _ in 0..50 {
            // Random values up to p^2.
            let x = BigInt::from_limbs(false, (0..8).map(|_| next()).collect());
            assert_eq!(fast.exit(&fast.enter(&x)), slow.exit(&slow.enter(&x)));
        }
    }

    #[test]
    fn montgomery_roundtrip_and_mul() {
        let m = b("bce6faada7179e84f3b9cac2fc632551");
        let mont = ReduceCtx::montgomery(m.clone());
        let gen = ReduceCtx::generic(m.clone());
        let a = b("123456789abcdef0fedcba9876543210");
        let c = b("0f0e0d0c0b0a09080706050403020100");
        assert_eq!(mont.exit(&mont.enter(&a)), a.umod(&m).unwrap());
        let lhs = mont.exit(&mont.mul(&mont.enter(&a), &mont.enter(&c)));
        let rhs = gen.exit(&gen.mul(&gen.enter(&a), &gen.enter(&c)));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn add_sub_neg_stay_in_range() {
        let m = BigInt::from_u64(1_000_003);
        let ctx = ReduceCtx::new(m.clone());
        let a = ctx.enter_u64(1_000_000);
        let c = ctx.enter_u64(7);
        assert_eq!(ctx.exit(&ctx.add(&a, &c)), BigInt::from_u64(4));
        assert_eq!(ctx.exit(&ctx.sub(&c, &a)), BigInt::from_u64(10));
        assert_eq!(ctx.exit(&ctx.neg(&c)), BigInt::from_u64(999_996));
        assert!(ctx.exit(&ctx.neg(&ctx.zero())).is_zero());
    }

    #[test]
    fn pow_window() {
        let ctx = ReduceCtx::new(BigInt::from_u64(1_000_003));
        let a = ctx.enter_u64(5);
        // 5^35 mod 1000003, reference computed by repeated squaring.
        let mut expect = BigInt::one();
        for _ in 0..35 {
            expect = (&expect * &BigInt::from_u64(5))
                .umod(&BigInt::from_u64(1_000_003))
                .unwrap();
        }
        assert_eq!(ctx.exit(&ctx.pow(&a, &BigInt::from_u64(35))), expect);
        assert!(ctx.exit(&ctx.pow(&a, &BigInt::zero())).is_one());
    }

    #[test]
    fn invert_all_strategies() {
        for ctx in [
            ReduceCtx::generic(BigInt::from_u64(1_000_003)),
            ReduceCtx::montgomery(BigInt::from_u64(1_000_003)),
        ] {
            let a = ctx.enter_u64(1234);
            let inv = ctx.invert(&a);
            assert!(ctx.exit(&ctx.mul(&a, &inv)).is_one());
        }
    }

    #[test]
    fn sqrt_both_branches() {
        // 1000003 = 3 mod 4
        let ctx = ReduceCtx::new(BigInt::from_u64(1_000_003));
        let a = ctx.enter_u64(1234);
        let sq = ctx.sqr(&a);
        let root = ctx.sqrt(&sq).unwrap();
        assert_eq!(ctx.sqr(&root), sq);

        // 1000033 = 1 mod 4 forces Tonelli-Shanks.
        let ctx = ReduceCtx::new(BigInt::from_u64(1_000_033));
        let a = ctx.enter_u64(98765);
        let sq = ctx.sqr(&a);
        let root = ctx.sqrt(&sq).unwrap();
        assert_eq!(ctx.sqr(&root), sq);

        // Non-residues are rejected rather than mis-rooted.
        let mut seen_none = false;
        for v in 2..40u64 {
            if ctx.sqrt(&ctx.enter_u64(v)).is_none() {
                seen_none = true;
                break;
            }
        }
        assert!(seen_none);
    }

    #[test]
    #[should_panic(expected = "reduce context mismatch")]
    fn context_mismatch_fails_fast() {
        let a_ctx = ReduceCtx::new(BigInt::from_u64(97));
        let b_ctx = ReduceCtx::new(BigInt::from_u64(101));
        let a = a_ctx.enter_u64(5);
        let c = b_ctx.enter_u64(5);
        let _ = a_ctx.add(&a, &c);
    }
}
