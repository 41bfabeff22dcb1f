//! Signed-digit scalar recodings.

use alloc::vec::Vec;
use bignum::BigInt;

/// Non-adjacent form: digits in `{-1, 0, 1}`, least significant first, no
/// two adjacent digits nonzero.
pub(crate) fn naf(k: &BigInt) -> Vec<i8> {
    recode(k, 1)
}

/// Width-`w` NAF. Nonzero digits are odd with `|d| < 2^w` and followed by at
/// least `w` zeros. Least significant digit first; `k` must be non-negative.
pub(crate) fn recode(k: &BigInt, w: u32) -> Vec<i8> {
    debug_assert!(!k.is_negative() && w >= 1 && w <= 6);
    let ws = 1i64 << (w + 1);
    let half = ws >> 1;
    let mut k = k.clone();
    let mut digits = Vec::with_capacity(k.bit_len() as usize + 1);
    while !k.is_zero() {
        let d = if k.is_odd() {
            let m = k.low_u64(w + 1) as i64;
            let d = if m > half - 1 { m - ws } else { m };
            if d >= 0 {
                k.sub_assign(&BigInt::from_u64(d as u64));
            } else {
                k.add_assign(&BigInt::from_u64((-d) as u64));
            }
            d as i8
        } else {
            0
        };
        digits.push(d);
        k.shr_assign(1);
    }
    digits
}

/// Joint sparse form of two non-negative scalars. Returns one digit vector
/// per scalar, equal length, least significant first, digits in `{-1, 0, 1}`.
/// Among all joint signed-binary expansions this one minimizes the number of
/// columns where either digit is nonzero, which is exactly the number of
/// additions in a shared-doubling double multiplication.
pub(crate) fn jsf(k1: &BigInt, k2: &BigInt) -> [Vec<i8>; 2] {
    debug_assert!(!k1.is_negative() && !k2.is_negative());
    let mut k1 = k1.clone();
    let mut k2 = k2.clone();
    let mut d1 = 0i64;
    let mut d2 = 0i64;
    let mut out = [Vec::new(), Vec::new()];

    while !k1.is_zero() || !k2.is_zero() || d1 == 1 || d2 == 1 {
        let mut m14 = (k1.low_u64(2) as i64 + d1) & 3;
        let mut m24 = (k2.low_u64(2) as i64 + d2) & 3;
        if m14 == 3 {
            m14 = -1;
        }
        if m24 == 3 {
            m24 = -1;
        }

        let u1 = if m14 & 1 == 0 {
            0
        } else {
            let m8 = (k1.low_u64(3) as i64 + d1) & 7;
            if (m8 == 3 || m8 == 5) && m24 == 2 {
                -m14
            } else {
                m14
            }
        };
        out[0].push(u1 as i8);

        let u2 = if m24 & 1 == 0 {
            0
        } else {
            let m8 = (k2.low_u64(3) as i64 + d2) & 7;
            if (m8 == 3 || m8 == 5) && m14 == 2 {
                -m24
            } else {
                m24
            }
        };
        out[1].push(u2 as i8);

        if 2 * d1 == u1 + 1 {
            d1 = 1 - d1;
        }
        if 2 * d2 == u2 + 1 {
            d2 = 1 - d2;
        }
        k1.shr_assign(1);
        k2.shr_assign(1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(digits: &[i8]) -> i64 {
        digits
            .iter()
            .enumerate()
            .map(|(i, &d)| (d as i64) << i)
            .sum()
    }

    #[test]
    fn naf_reconstructs_and_is_sparse() {
        for v in [0u64, 1, 2, 7, 255, 1000, 0xdead_beef] {
            let digits = naf(&BigInt::from_u64(v));
            assert_eq!(eval(&digits) as u64, v, "value {v}");
            for pair in digits.windows(2) {
                assert!(pair[0] == 0 || pair[1] == 0, "adjacent digits for {v}");
            }
        }
    }

    #[test]
    fn wnaf_digits_are_odd_and_bounded() {
        for v in [1u64, 31, 1000, 0x1234_5678_9abc_def0] {
            let digits = recode(&BigInt::from_u64(v), 4);
            assert_eq!(eval(&digits) as u64, v);
            for (i, &d) in digits.iter().enumerate() {
                if d != 0 {
                    assert!(d % 2 != 0 && d.unsigned_abs() < 16);
                    // at least w zeros follow a nonzero digit
                    for &next in digits.iter().skip(i + 1).take(4) {
                        assert_eq!(next, 0, "window violated for {v}");
                    }
                }
            }
        }
    }

    #[test]
    fn jsf_reconstructs_both_scalars() {
        for (a, b) in [(0u64, 0u64), (1, 1), (3, 5), (1000, 1), (0xffff, 0xaaaa)] {
            let [j1, j2] = jsf(&BigInt::from_u64(a), &BigInt::from_u64(b));
            assert_eq!(j1.len(), j2.len());
            assert_eq!(eval(&j1) as u64, a, "({a}, {b})");
            assert_eq!(eval(&j2) as u64, b, "({a}, {b})");
        }
    }

    #[test]
    fn jsf_beats_independent_naf_density() {
        let a = BigInt::from_u64(0xdead_beef_cafe_f00d);
        let b = BigInt::from_u64(0x0123_4567_89ab_cdef);
        let [j1, j2] = jsf(&a, &b);
        let joint: usize = j1
            .iter()
            .zip(&j2)
            .filter(|(x, y)| **x != 0 || **y != 0)
            .count();
        let n1 = naf(&a);
        let n2 = naf(&b);
        let separate = (0..n1.len().max(n2.len()))
            .filter(|&i| {
                n1.get(i).copied().unwrap_or(0) != 0 || n2.get(i).copied().unwrap_or(0) != 0
            })
            .count();
        assert!(joint <= separate);
    }
}
