use crate::BigInt;

impl BigInt {
    /// Binary extended Euclid. Returns `(a, b, g)` with `a*self + b*m == g`
    /// and `g = gcd(self, m)`. `m` must be positive.
    pub fn egcd(&self, m: &Self) -> (Self, Self, Self) {
        debug_assert!(!m.negative && !m.is_zero());
        // Run on the magnitude; the sign is folded back into the first
        // coefficient at the end.
        let mut x = self.abs();
        let mut y = m.clone();

        let mut g = 0u32;
        while x.is_even() && y.is_even() {
            x.shr_assign(1);
            y.shr_assign(1);
            g += 1;
        }

        let yp = y.clone();
        let xp = x.clone();

        let mut a = Self::one();
        let mut b = Self::zero();
        let mut c = Self::zero();
        let mut d = Self::one();

        while !x.is_zero() {
            let i = x.trailing_zeros();
            x.shr_assign(i);
            for _ in 0..i {
                if a.is_odd() || b.is_odd() {
                    a.add_assign(&yp);
                    b.sub_assign(&xp);
                }
                a.shr_assign(1);
                b.shr_assign(1);
            }

            let j = y.trailing_zeros();
            y.shr_assign(j);
            for _ in 0..j {
                if c.is_odd() || d.is_odd() {
                    c.add_assign(&yp);
                    d.sub_assign(&xp);
                }
                c.shr_assign(1);
                d.shr_assign(1);
            }

            if x.cmp(&y) != core::cmp::Ordering::Less {
                x.sub_assign(&y);
                a.sub_assign(&c);
                b.sub_assign(&d);
            } else {
                y.sub_assign(&x);
                c.sub_assign(&a);
                d.sub_assign(&b);
            }
        }

        if self.negative {
            c.negate();
        }
        (c, d, y.shl(g))
    }

    /// Modular inverse for arbitrary positive modulus. `None` when `m <= 1`
    /// or `gcd(self, m) != 1`.
    pub fn invm(&self, m: &Self) -> Option<Self> {
        if m.negative || m.cmp(&Self::one()) != core::cmp::Ordering::Greater {
            return None;
        }
        let (a, _, g) = self.egcd(m);
        if !g.is_one() {
            return None;
        }
        Some(a.umod(m).unwrap())
    }

    /// Faster inverse specialized for odd moduli: the binary algorithm only
    /// has to track one Bezout coefficient pair. Returns 0 for a zero input;
    /// callers guard invertibility.
    pub fn invmp(&self, p: &Self) -> Self {
        debug_assert!(p.is_odd() && !p.negative);
        let mut a = self.umod(p).unwrap();
        let mut b = p.clone();
        let mut x1 = Self::one();
        let mut x2 = Self::zero();
        let one = Self::one();

        while a.cmp(&one) == core::cmp::Ordering::Greater
            && b.cmp(&one) == core::cmp::Ordering::Greater
        {
            let i = a.trailing_zeros();
            a.shr_assign(i);
            for _ in 0..i {
                if x1.is_odd() {
                    x1.add_assign(p);
                }
                x1.shr_assign(1);
            }

            let j = b.trailing_zeros();
            b.shr_assign(j);
            for _ in 0..j {
                if x2.is_odd() {
                    x2.add_assign(p);
                }
                x2.shr_assign(1);
            }

            if a.cmp(&b) != core::cmp::Ordering::Less {
                a.sub_assign(&b);
                x1.sub_assign(&x2);
            } else {
                b.sub_assign(&a);
                x2.sub_assign(&x1);
            }
        }

        let res = if a.is_one() { x1 } else { x2 };
        res.umod(p).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> BigInt {
        BigInt::from_i64(v)
    }

    #[test]
    fn egcd_bezout() {
        for (x, m) in [
            (240i64, 46i64),
            (7, 13),
            (35, 15),
            (1, 5),
            (270, 192),
            (-1, 3),
            (-7, 13),
            (-240, 46),
            (-35, 15),
        ] {
            let (a, b, g) = n(x).egcd(&n(m));
            let mut lhs = &a * &n(x);
            lhs.add_assign(&(&b * &n(m)));
            assert_eq!(lhs, g, "bezout for ({x}, {m})");
            assert_eq!(g, n(gcd_ref(x, m)), "gcd for ({x}, {m})");
        }
    }

    fn gcd_ref(mut a: i64, mut b: i64) -> i64 {
        while b != 0 {
            let t = a % b;
            a = b;
            b = t;
        }
        a.abs()
    }

    #[test]
    fn invm_basic() {
        let inv = n(3).invm(&n(11)).unwrap();
        assert_eq!(inv, n(4));
        assert_eq!(n(4).invm(&n(8)), None);
        assert_eq!(n(4).invm(&n(1)), None);
        let neg = n(-3).invm(&n(11)).unwrap();
        assert_eq!((&neg * &n(-3)).umod(&n(11)).unwrap(), n(1));
    }

    #[test]
    fn invmp_matches_invm() {
        let p = BigInt::from_u64(1_000_003); // odd prime
        for v in [2u64, 17, 65537, 999_999] {
            let x = BigInt::from_u64(v);
            assert_eq!(x.invmp(&p), x.invm(&p).unwrap(), "v = {v}");
        }
    }
}
