use crate::BigInt;
use alloc::vec;
use alloc::vec::Vec;

/// Operand-length threshold (total limbs) below which the row-wise schoolbook
/// multiplication wins over the column scan.
const SCHOOLBOOK_LIMIT: usize = 16;

impl BigInt {
    pub fn mul_assign(&mut self, other: &Self) {
        *self = &*self * other;
    }

    pub fn sqr(&self) -> Self {
        self * self
    }

    pub fn mul_u64(&self, v: u64) -> Self {
        let mut limbs = Vec::with_capacity(self.limbs.len() + 1);
        let mut carry = 0u64;
        for &w in &self.limbs {
            let p = w as u128 * v as u128 + carry as u128;
            limbs.push(p as u64);
            carry = (p >> 64) as u64;
        }
        if carry != 0 {
            limbs.push(carry);
        }
        Self::from_limbs(self.negative && v != 0, limbs)
    }
}

impl core::ops::Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &BigInt) -> BigInt {
        let limbs = umul(&self.limbs, &rhs.limbs);
        BigInt::from_limbs(self.negative != rhs.negative, limbs)
    }
}

/// Magnitude multiplication. Three interchangeable algorithms selected purely
/// by operand length; all agree bit-for-bit.
pub(crate) fn umul(a: &[u64], b: &[u64]) -> Vec<u64> {
    if a.len() == 4 && b.len() == 4 {
        mul_comb4(a, b)
    } else if a.len() + b.len() <= SCHOOLBOOK_LIMIT {
        mul_schoolbook(a, b)
    } else {
        mul_comba(a, b)
    }
}

/// Row-wise schoolbook: one carry chain per row of partial products.
fn mul_schoolbook(a: &[u64], b: &[u64]) -> Vec<u64> {
    let mut res = vec![0u64; a.len() + b.len()];
    for (i, &ai) in a.iter().enumerate() {
        let mut carry = 0u64;
        for (j, &bj) in b.iter().enumerate() {
            let p = ai as u128 * bj as u128 + res[i + j] as u128 + carry as u128;
            res[i + j] = p as u64;
            carry = (p >> 64) as u64;
        }
        res[i + b.len()] = carry;
    }
    res
}

/// Column scan with a 192-bit accumulator (128-bit word plus an overflow
/// limb), one store per output limb. Wins on long operands where the per-row
/// carry chains of the schoolbook dominate.
fn mul_comba(a: &[u64], b: &[u64]) -> Vec<u64> {
    let mut res = vec![0u64; a.len() + b.len()];
    let mut acc = 0u128;
    let mut over = 0u64;
    for k in 0..res.len() {
        let lo = k.saturating_sub(b.len() - 1);
        let hi = core::cmp::min(k, a.len() - 1);
        let mut i = lo;
        while i <= hi {
            let p = a[i] as u128 * b[k - i] as u128;
            let (s, c) = acc.overflowing_add(p);
            acc = s;
            over += c as u64;
            i += 1;
        }
        res[k] = acc as u64;
        acc = (acc >> 64) | ((over as u128) << 64);
        over = 0;
    }
    res
}

/// Fixed 4x4-limb comb for 256-bit operands, the hot shape under the shipped
/// curves. Same column scan as [`mul_comba`] with constant bounds so the
/// compiler fully unrolls it.
fn mul_comb4(a: &[u64], b: &[u64]) -> Vec<u64> {
    debug_assert!(a.len() == 4 && b.len() == 4);
    let mut res = [0u64; 8];
    let mut acc = 0u128;
    let mut over = 0u64;
    for k in 0..8usize {
        let lo = k.saturating_sub(3);
        let hi = if k < 3 { k } else { 3 };
        for i in lo..=hi {
            let p = a[i] as u128 * b[k - i] as u128;
            let (s, c) = acc.overflowing_add(p);
            acc = s;
            over += c as u64;
        }
        res[k] = acc as u64;
        acc = (acc >> 64) | ((over as u128) << 64);
        over = 0;
    }
    res.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BigInt;

    #[test]
    fn paths_agree() {
        // Pseudo-random limbs; the three algorithms must match bit for bit.
        let mut state = 0x9e37_79b9_7f4a_7c15u64;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        for len in [1usize, 2, 4, 7, 12, 20] {
            let a: Vec<u64> = (0..len).map(|_| next()).collect();
            let b: Vec<u64> = (0..len).map(|_| next()).collect();
            let school = mul_schoolbook(&a, &b);
            assert_eq!(mul_comba(&a, &b), school, "len {len}");
            if len == 4 {
                assert_eq!(mul_comb4(&a, &b), school);
            }
        }
    }

    #[test]
    fn small_products() {
        let a = BigInt::from_u64(u64::MAX);
        let sq = &a * &a;
        // (2^64 - 1)^2 = 2^128 - 2^65 + 1
        assert_eq!(sq.limbs, vec![1, u64::MAX - 1]);
        assert_eq!(&BigInt::zero() * &a, BigInt::zero());
        assert_eq!(a.mul_u64(u64::MAX), sq);
    }

    #[test]
    fn sign_rules() {
        let a = BigInt::from_i64(-3);
        let b = BigInt::from_i64(7);
        assert_eq!(&a * &b, BigInt::from_i64(-21));
        assert_eq!(&a * &a, BigInt::from_i64(9));
        assert!(!(&a * &BigInt::zero()).is_negative());
    }
}
