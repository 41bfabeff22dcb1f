use crate::bigint::ucmp_limbs;
use crate::{BigInt, Error};
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

impl BigInt {
    /// Truncating division: the quotient rounds toward zero and the remainder
    /// carries the dividend's sign, so `a == q*b + r` always holds.
    pub fn div_rem(&self, other: &Self) -> Result<(Self, Self), Error> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let (q_limbs, r_limbs) = udiv_rem(&self.limbs, &other.limbs);
        let q = Self::from_limbs(self.negative != other.negative, q_limbs);
        let r = Self::from_limbs(self.negative, r_limbs);
        Ok((q, r))
    }

    pub fn div(&self, other: &Self) -> Result<Self, Error> {
        Ok(self.div_rem(other)?.0)
    }

    pub fn rem(&self, other: &Self) -> Result<Self, Error> {
        Ok(self.div_rem(other)?.1)
    }

    /// Non-negative remainder in `[0, |other|)`.
    pub fn umod(&self, other: &Self) -> Result<Self, Error> {
        let mut r = self.rem(other)?;
        if r.negative {
            r.add_assign(&other.abs());
        }
        Ok(r)
    }

    /// Division rounded to the nearest quotient, halves away from zero.
    /// The divisor must be positive.
    pub fn div_round(&self, other: &Self) -> Result<Self, Error> {
        debug_assert!(!other.negative);
        let (q, r) = self.div_rem(other)?;
        if r.is_zero() {
            return Ok(q);
        }
        let half = other.shr(1);
        let round_up = match r.abs().cmp(&half) {
            Ordering::Greater => true,
            // Exact half rounds away from zero only for even divisors.
            Ordering::Equal => other.is_even(),
            Ordering::Less => false,
        };
        if !round_up {
            return Ok(q);
        }
        let mut q = q;
        if self.negative != other.negative {
            q.sub_assign(&Self::one());
        } else {
            q.add_assign(&Self::one());
        }
        Ok(q)
    }

    /// Remainder by a single limb, for the string formatter.
    pub(crate) fn div_rem_u64(&self, d: u64) -> (Self, u64) {
        let (q, r) = udiv_rem_limb(&self.limbs, d);
        (Self::from_limbs(self.negative, q), r)
    }
}

/// Magnitude division. Knuth Algorithm D with a single-limb fast path.
fn udiv_rem(a: &[u64], b: &[u64]) -> (Vec<u64>, Vec<u64>) {
    if ucmp_limbs(a, b) == Ordering::Less {
        return (vec![0], a.to_vec());
    }
    if b.len() == 1 {
        let (q, r) = udiv_rem_limb(a, b[0]);
        return (q, vec![r]);
    }

    let n = b.len();
    let m = a.len() - n;

    // D1: normalize so the divisor's leading limb has its top bit set.
    let shift = b[n - 1].leading_zeros();
    let v = shl_limbs(b, shift);
    let mut u = shl_limbs(a, shift);
    u.resize(a.len() + 1, 0);

    let mut q = vec![0u64; m + 1];
    for j in (0..=m).rev() {
        // D3: estimate the quotient limb from the top two dividend limbs,
        // capped at the limb radix.
        let num = ((u[j + n] as u128) << 64) | u[j + n - 1] as u128;
        let mut qhat = num / v[n - 1] as u128;
        let mut rhat = num % v[n - 1] as u128;
        if qhat > u64::MAX as u128 {
            qhat = u64::MAX as u128;
            rhat = num - qhat * v[n - 1] as u128;
        }
        while rhat <= u64::MAX as u128
            && qhat * v[n - 2] as u128 > ((rhat << 64) | u[j + n - 2] as u128)
        {
            qhat -= 1;
            rhat += v[n - 1] as u128;
        }

        // D4: multiply and subtract.
        let mut borrow = 0i128;
        for i in 0..n {
            let p = qhat * v[i] as u128;
            let t = u[j + i] as i128 - borrow - (p as u64) as i128;
            u[j + i] = t as u64;
            borrow = (p >> 64) as i128 - (t >> 64);
        }
        let t = u[j + n] as i128 - borrow;
        u[j + n] = t as u64;

        // D6: the estimate was one too large; add the divisor back.
        if t < 0 {
            qhat -= 1;
            let mut carry = 0u128;
            for i in 0..n {
                let s = u[j + i] as u128 + v[i] as u128 + carry;
                u[j + i] = s as u64;
                carry = s >> 64;
            }
            u[j + n] = u[j + n].wrapping_add(carry as u64);
        }
        q[j] = qhat as u64;
    }

    // D8: denormalize the remainder.
    let r = shr_limbs(&u[..n], shift);
    (q, r)
}

fn udiv_rem_limb(a: &[u64], d: u64) -> (Vec<u64>, u64) {
    debug_assert!(d != 0);
    let mut q = vec![0u64; a.len()];
    let mut rem = 0u64;
    for i in (0..a.len()).rev() {
        let cur = ((rem as u128) << 64) | a[i] as u128;
        q[i] = (cur / d as u128) as u64;
        rem = (cur % d as u128) as u64;
    }
    (q, rem)
}

fn shl_limbs(a: &[u64], shift: u32) -> Vec<u64> {
    let mut out = Vec::with_capacity(a.len() + 1);
    if shift == 0 {
        out.extend_from_slice(a);
        return out;
    }
    let mut carry = 0u64;
    for &w in a {
        out.push((w << shift) | carry);
        carry = w >> (64 - shift);
    }
    if carry != 0 {
        out.push(carry);
    }
    out
}

fn shr_limbs(a: &[u64], shift: u32) -> Vec<u64> {
    let mut out = a.to_vec();
    if shift == 0 {
        return out;
    }
    let mut carry = 0u64;
    for w in out.iter_mut().rev() {
        let next = *w << (64 - shift);
        *w = (*w >> shift) | carry;
        carry = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> BigInt {
        BigInt::from_i64(v)
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(n(5).div_rem(&BigInt::zero()), Err(Error::DivisionByZero));
    }

    #[test]
    fn truncating_signs() {
        for (a, b) in [(7i64, 3i64), (-7, 3), (7, -3), (-7, -3)] {
            let (q, r) = n(a).div_rem(&n(b)).unwrap();
            assert_eq!(q, n(a / b), "{a}/{b}");
            assert_eq!(r, n(a % b), "{a}%{b}");
        }
        assert_eq!(n(-7).umod(&n(3)).unwrap(), n(2));
        assert_eq!(n(-7).umod(&n(-3)).unwrap(), n(2));
    }

    #[test]
    fn multi_limb_reconstruction() {
        let mut state = 0x243f_6a88_85a3_08d3u64;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        for (alen, blen) in [(5usize, 2usize), (8, 3), (6, 6), (9, 1), (3, 5)] {
            let a = BigInt::from_limbs(false, (0..alen).map(|_| next()).collect());
            let b = BigInt::from_limbs(false, (0..blen).map(|_| next() | 1).collect());
            let (q, r) = a.div_rem(&b).unwrap();
            assert!(r.ucmp(&b) == Ordering::Less);
            let mut back = &q * &b;
            back.add_assign(&r);
            assert_eq!(back, a, "a={alen} limbs, b={blen} limbs");
        }
    }

    #[test]
    fn qhat_correction_path() {
        // Dividend engineered so the two-limb estimate overshoots.
        let a = BigInt::from_limbs(false, vec![0, 0, u64::MAX - 1, u64::MAX]);
        let b = BigInt::from_limbs(false, vec![u64::MAX, u64::MAX]);
        let (q, r) = a.div_rem(&b).unwrap();
        let mut back = &q * &b;
        back.add_assign(&r);
        assert_eq!(back, a);
        assert!(r.ucmp(&b) == Ordering::Less);
    }

    #[test]
    fn div_round_halves() {
        assert_eq!(n(7).div_round(&n(2)).unwrap(), n(4));
        assert_eq!(n(-7).div_round(&n(2)).unwrap(), n(-4));
        assert_eq!(n(5).div_round(&n(3)).unwrap(), n(2));
        assert_eq!(n(4).div_round(&n(3)).unwrap(), n(1));
        assert_eq!(n(9).div_round(&n(6)).unwrap(), n(2));
    }
}
