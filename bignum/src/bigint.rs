use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use zeroize::Zeroize;

/// Sign-magnitude arbitrary-precision integer.
///
/// The magnitude is a little-limb-first `u64` vector. Invariants: at least one
/// limb, no most-significant zero limb except for the single limb of the value
/// zero, and zero is never negative.
#[derive(Clone)]
pub struct BigInt {
    pub(crate) negative: bool,
    pub(crate) limbs: Vec<u64>,
}

impl BigInt {
    pub fn zero() -> Self {
        Self {
            negative: false,
            limbs: vec![0],
        }
    }

    pub fn one() -> Self {
        Self::from_u64(1)
    }

    pub fn from_u64(v: u64) -> Self {
        Self {
            negative: false,
            limbs: vec![v],
        }
    }

    pub fn from_i64(v: i64) -> Self {
        Self {
            negative: v < 0,
            limbs: vec![v.unsigned_abs()],
        }
    }

    pub(crate) fn from_limbs(negative: bool, limbs: Vec<u64>) -> Self {
        let mut r = Self { negative, limbs };
        r.strip();
        r
    }

    /// Restores the no-leading-zero-limb invariant after a shrinking mutation.
    pub(crate) fn strip(&mut self) {
        while self.limbs.len() > 1 && *self.limbs.last().unwrap() == 0 {
            self.limbs.pop();
        }
        if self.limbs == [0] {
            self.negative = false;
        }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 0
    }

    pub fn is_one(&self) -> bool {
        !self.negative && self.limbs.len() == 1 && self.limbs[0] == 1
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Number of significant bits of the magnitude; zero has bit length 0.
    pub fn bit_len(&self) -> u32 {
        let top = *self.limbs.last().unwrap();
        if top == 0 {
            debug_assert_eq!(self.limbs.len(), 1);
            return 0;
        }
        (self.limbs.len() as u32 - 1) * 64 + (64 - top.leading_zeros())
    }

    /// Minimal number of bytes needed to store the magnitude; at least 1.
    pub fn byte_len(&self) -> usize {
        core::cmp::max(1, (self.bit_len() as usize + 7) / 8)
    }

    /// Number of trailing zero bits of the magnitude; 0 for the value zero.
    pub fn trailing_zeros(&self) -> u32 {
        if self.is_zero() {
            return 0;
        }
        let mut count = 0;
        for &w in &self.limbs {
            if w == 0 {
                count += 64;
            } else {
                count += w.trailing_zeros();
                break;
            }
        }
        count
    }

    /// Tests the magnitude bit at absolute index `i`.
    pub fn bit(&self, i: u32) -> bool {
        let limb = (i / 64) as usize;
        if limb >= self.limbs.len() {
            return false;
        }
        self.limbs[limb] >> (i % 64) & 1 == 1
    }

    /// Sets the magnitude bit at absolute index `i`, growing as needed.
    pub fn set_bit(&mut self, i: u32, value: bool) {
        let limb = (i / 64) as usize;
        if limb >= self.limbs.len() {
            if !value {
                return;
            }
            self.limbs.resize(limb + 1, 0);
        }
        if value {
            self.limbs[limb] |= 1 << (i % 64);
        } else {
            self.limbs[limb] &= !(1 << (i % 64));
            self.strip();
        }
    }

    /// Extracts `count <= 64` magnitude bits starting at bit `pos`.
    pub fn bits_at(&self, pos: u32, count: u32) -> u64 {
        debug_assert!(count >= 1 && count <= 64);
        let limb = (pos / 64) as usize;
        let off = pos % 64;
        if limb >= self.limbs.len() {
            return 0;
        }
        let mut word = self.limbs[limb] >> off;
        if off != 0 && limb + 1 < self.limbs.len() {
            word |= self.limbs[limb + 1] << (64 - off);
        }
        if count == 64 {
            word
        } else {
            word & ((1u64 << count) - 1)
        }
    }

    /// Low `bits <= 64` bits of the magnitude as a machine word.
    pub fn low_u64(&self, bits: u32) -> u64 {
        self.bits_at(0, bits)
    }

    /// Magnitude comparison, ignoring signs.
    pub fn ucmp(&self, other: &Self) -> Ordering {
        ucmp_limbs(&self.limbs, &other.limbs)
    }

    pub fn neg(&self) -> Self {
        let mut r = self.clone();
        r.negate();
        r
    }

    pub fn negate(&mut self) {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            limbs: self.limbs.clone(),
        }
    }

    /// Magnitude add, ignoring signs.
    fn uadd_assign(&mut self, other: &Self) {
        let mut carry = false;
        if self.limbs.len() < other.limbs.len() {
            self.limbs.resize(other.limbs.len(), 0);
        }
        for i in 0..self.limbs.len() {
            let b = other.limbs.get(i).copied().unwrap_or(0);
            let (s, c1) = self.limbs[i].overflowing_add(b);
            let (s, c2) = s.overflowing_add(carry as u64);
            self.limbs[i] = s;
            carry = c1 || c2;
        }
        if carry {
            self.limbs.push(1);
        }
    }

    /// Magnitude subtract; the receiver's magnitude must not be smaller.
    fn usub_assign(&mut self, other: &Self) {
        debug_assert!(self.ucmp(other) != Ordering::Less);
        let mut borrow = false;
        for i in 0..self.limbs.len() {
            let b = other.limbs.get(i).copied().unwrap_or(0);
            let (d, b1) = self.limbs[i].overflowing_sub(b);
            let (d, b2) = d.overflowing_sub(borrow as u64);
            self.limbs[i] = d;
            borrow = b1 || b2;
        }
        debug_assert!(!borrow);
        self.strip();
    }

    /// Signed in-place addition; magnitude-then-sign.
    pub fn add_assign(&mut self, other: &Self) {
        if self.negative == other.negative {
            self.uadd_assign(other);
            return;
        }
        match self.ucmp(other) {
            Ordering::Equal => *self = Self::zero(),
            Ordering::Greater => self.usub_assign(other),
            Ordering::Less => {
                let mut r = other.clone();
                r.usub_assign(self);
                *self = r;
            }
        }
    }

    pub fn sub_assign(&mut self, other: &Self) {
        // a - b == a + (-b); avoid cloning `other` for the flipped sign.
        if self.negative != other.negative {
            self.uadd_assign(other);
            return;
        }
        match self.ucmp(other) {
            Ordering::Equal => *self = Self::zero(),
            Ordering::Greater => self.usub_assign(other),
            Ordering::Less => {
                let mut r = other.clone();
                r.usub_assign(self);
                r.negate();
                *self = r;
            }
        }
    }

    /// Logical left shift of the magnitude by an arbitrary bit count.
    pub fn shl_assign(&mut self, bits: u32) {
        if self.is_zero() || bits == 0 {
            return;
        }
        let limbs = (bits / 64) as usize;
        let off = bits % 64;
        if off != 0 {
            let mut carry = 0u64;
            for w in self.limbs.iter_mut() {
                let new_carry = *w >> (64 - off);
                *w = (*w << off) | carry;
                carry = new_carry;
            }
            if carry != 0 {
                self.limbs.push(carry);
            }
        }
        if limbs != 0 {
            let mut shifted = vec![0u64; limbs];
            shifted.extend_from_slice(&self.limbs);
            self.limbs = shifted;
        }
    }

    pub fn shl(&self, bits: u32) -> Self {
        let mut r = self.clone();
        r.shl_assign(bits);
        r
    }

    /// Logical right shift of the magnitude; the sign is preserved.
    pub fn shr_assign(&mut self, bits: u32) {
        let limbs = (bits / 64) as usize;
        let off = bits % 64;
        if limbs >= self.limbs.len() {
            *self = Self::zero();
            return;
        }
        if limbs != 0 {
            self.limbs.drain(..limbs);
        }
        if off != 0 {
            let mut carry = 0u64;
            for w in self.limbs.iter_mut().rev() {
                let new_carry = *w << (64 - off);
                *w = (*w >> off) | carry;
                carry = new_carry;
            }
        }
        self.strip();
    }

    pub fn shr(&self, bits: u32) -> Self {
        let mut r = self.clone();
        r.shr_assign(bits);
        r
    }

    /// Splits the magnitude at bit `n`, capturing the shifted-out low bits:
    /// returns `(self mod 2^n, self >> n)`. Used by the reduction fast paths.
    pub fn split_bits(&self, n: u32) -> (Self, Self) {
        (self.mask_bits(n), self.shr(n))
    }

    /// Keeps the low `width` bits of the magnitude.
    pub fn mask_bits(&self, width: u32) -> Self {
        let mut r = self.abs();
        r.mask_bits_assign(width);
        r
    }

    pub(crate) fn mask_bits_assign(&mut self, width: u32) {
        let full = (width / 64) as usize;
        let off = width % 64;
        if full >= self.limbs.len() {
            return;
        }
        let keep = full + (off != 0) as usize;
        self.limbs.truncate(core::cmp::max(keep, 1));
        if off != 0 && keep <= self.limbs.len() {
            let last = self.limbs.len() - 1;
            self.limbs[last] &= (1u64 << off) - 1;
        } else if keep == 0 {
            self.limbs[0] = 0;
        }
        self.strip();
    }

    /// Flips the low `width` bits of a non-negative value.
    pub fn not_bits(&self, width: u32) -> Self {
        debug_assert!(!self.negative);
        let len = ((width + 63) / 64) as usize;
        let mut limbs = vec![u64::MAX; len];
        for (i, w) in limbs.iter_mut().enumerate() {
            *w ^= self.limbs.get(i).copied().unwrap_or(0);
        }
        let mut r = Self::from_limbs(false, limbs);
        r.mask_bits_assign(width);
        r
    }

    /// Fixed-width two's-complement interpretation of `self`.
    pub fn to_twos(&self, width: u32) -> Self {
        if !self.negative {
            return self.clone();
        }
        let mut r = self.abs().not_bits(width);
        r.add_assign(&Self::one());
        r.mask_bits_assign(width);
        r
    }

    /// Inverse of [`to_twos`](Self::to_twos).
    pub fn from_twos(&self, width: u32) -> Self {
        if self.bit(width - 1) {
            let mut r = self.not_bits(width);
            r.add_assign(&Self::one());
            r.negate();
            r
        } else {
            self.clone()
        }
    }

    /// Plain square-and-multiply exponentiation, skipping leading zero bits.
    pub fn pow(&self, exp: &Self) -> Self {
        debug_assert!(!exp.negative);
        if exp.is_zero() {
            return Self::one();
        }
        let mut res = self.clone();
        for i in (0..exp.bit_len() - 1).rev() {
            res = &res * &res;
            if exp.bit(i) {
                res = &res * self;
            }
        }
        res
    }
}

pub(crate) fn ucmp_limbs(a: &[u64], b: &[u64]) -> Ordering {
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for i in (0..a.len()).rev() {
        if a[i] != b[i] {
            return a[i].cmp(&b[i]);
        }
    }
    Ordering::Equal
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.negative == other.negative && self.limbs == other.limbs
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.ucmp(other),
            (true, true) => other.ucmp(self),
        }
    }
}

impl core::ops::Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, rhs: &BigInt) -> BigInt {
        let mut r = self.clone();
        r.add_assign(rhs);
        r
    }
}

impl core::ops::Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, rhs: &BigInt) -> BigInt {
        let mut r = self.clone();
        r.sub_assign(rhs);
        r
    }
}

impl core::ops::Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.negate();
        self
    }
}

impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.negative.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> BigInt {
        BigInt::from_i64(v)
    }

    #[test]
    fn add_sub_signs() {
        let cases: [(i64, i64); 8] = [
            (5, 7),
            (-5, 7),
            (5, -7),
            (-5, -7),
            (7, 7),
            (-7, 7),
            (0, 3),
            (0, 0),
        ];
        for (a, b) in cases {
            assert_eq!(&n(a) + &n(b), n(a + b), "{a} + {b}");
            assert_eq!(&n(a) - &n(b), n(a - b), "{a} - {b}");
        }
    }

    #[test]
    fn zero_is_positive() {
        let z = &n(5) - &n(5);
        assert!(z.is_zero());
        assert!(!z.is_negative());
        assert_eq!(z.limbs.len(), 1);
    }

    #[test]
    fn carry_across_limbs() {
        let a = BigInt::from_limbs(false, vec![u64::MAX, u64::MAX]);
        let sum = &a + &BigInt::one();
        assert_eq!(sum.limbs, vec![0, 0, 1]);
        assert_eq!(&sum - &BigInt::one(), a);
    }

    #[test]
    fn shifts_roundtrip() {
        let a = BigInt::from_limbs(false, vec![0x0123_4567_89ab_cdef, 0xfedc]);
        assert_eq!(a.shl(67).shr(67), a);
        assert_eq!(a.shr(200), BigInt::zero());
        assert_eq!(a.shl(3).bit_len(), a.bit_len() + 3);
    }

    #[test]
    fn split_and_mask() {
        let a = BigInt::from_u64(0b1011_0110);
        let (lo, hi) = a.split_bits(4);
        assert_eq!(lo, BigInt::from_u64(0b0110));
        assert_eq!(hi, BigInt::from_u64(0b1011));
        assert_eq!(a.mask_bits(128), a);
    }

    #[test]
    fn bits_at_spans_limbs() {
        let a = BigInt::from_limbs(false, vec![0x8000_0000_0000_0000, 0b101]);
        assert_eq!(a.bits_at(63, 4), 0b1011);
        assert_eq!(a.bit_len(), 67);
        assert_eq!(a.trailing_zeros(), 63);
    }

    #[test]
    fn twos_complement() {
        assert_eq!(n(-1).to_twos(64), BigInt::from_u64(u64::MAX));
        assert_eq!(BigInt::from_u64(u64::MAX).from_twos(64), n(-1));
        let v = n(-123456789);
        assert_eq!(v.to_twos(128).from_twos(128), v);
        let w = n(123456789);
        assert_eq!(w.to_twos(128).from_twos(128), w);
    }

    #[test]
    fn pow_small() {
        assert_eq!(n(3).pow(&n(7)), n(2187));
        assert_eq!(n(2).pow(&n(0)), n(1));
        assert_eq!(n(2).pow(&n(70)).bit_len(), 71);
    }
}
