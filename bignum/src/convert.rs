use crate::{BigInt, Error};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

impl BigInt {
    /// Parses a string in the given radix (2..=36), with an optional leading
    /// `-`. ASCII letters of either case are accepted above radix 10.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, Error> {
        if !(2..=36).contains(&radix) {
            return Err(Error::InvalidFormat);
        }
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() {
            return Err(Error::InvalidFormat);
        }
        let mut r = Self::zero();
        for c in digits.chars() {
            let d = c.to_digit(radix).ok_or(Error::InvalidFormat)?;
            r = r.mul_u64(radix as u64);
            r.add_assign(&Self::from_u64(d as u64));
        }
        if negative {
            r.negate();
        }
        Ok(r)
    }

    /// Parses a hex string, tolerating an optional `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let rest = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")).unwrap_or(rest);
        let mut r = Self::from_str_radix(rest, 16)?;
        if negative {
            r.negate();
        }
        Ok(r)
    }

    pub fn to_str_radix(&self, radix: u32) -> String {
        assert!((2..=36).contains(&radix), "radix out of range");
        if self.is_zero() {
            return String::from("0");
        }
        // Peel off the largest radix power fitting one limb per division.
        let mut chunk = radix as u64;
        let mut chunk_digits = 1u32;
        while let Some(next) = chunk.checked_mul(radix as u64) {
            chunk = next;
            chunk_digits += 1;
        }

        let mut digits: Vec<u8> = Vec::new();
        let mut cur = self.abs();
        loop {
            let (q, mut r) = cur.div_rem_u64(chunk);
            if q.is_zero() {
                // Most significant chunk: no interior zero padding.
                loop {
                    digits.push(char::from_digit((r % radix as u64) as u32, radix).unwrap() as u8);
                    r /= radix as u64;
                    if r == 0 {
                        break;
                    }
                }
                break;
            }
            for _ in 0..chunk_digits {
                digits.push(char::from_digit((r % radix as u64) as u32, radix).unwrap() as u8);
                r /= radix as u64;
            }
            cur = q;
        }
        if self.negative {
            digits.push(b'-');
        }
        digits.reverse();
        String::from_utf8(digits).unwrap()
    }

    pub fn to_hex(&self) -> String {
        self.to_str_radix(16)
    }

    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len() / 8 + 1);
        for chunk in bytes.rchunks(8) {
            let mut w = 0u64;
            for &b in chunk {
                w = (w << 8) | b as u64;
            }
            limbs.push(w);
        }
        if limbs.is_empty() {
            limbs.push(0);
        }
        Self::from_limbs(false, limbs)
    }

    pub fn from_bytes_le(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len() / 8 + 1);
        for chunk in bytes.chunks(8) {
            let mut w = 0u64;
            for (i, &b) in chunk.iter().enumerate() {
                w |= (b as u64) << (8 * i);
            }
            limbs.push(w);
        }
        if limbs.is_empty() {
            limbs.push(0);
        }
        Self::from_limbs(false, limbs)
    }

    /// Big-endian magnitude export zero-padded to exactly `len` bytes.
    pub fn to_bytes_be(&self, len: usize) -> Result<Vec<u8>, Error> {
        let need = self.min_byte_len();
        if need > len {
            return Err(Error::BufferTooSmall);
        }
        let mut out = vec![0u8; len];
        for (i, byte) in out.iter_mut().rev().enumerate() {
            let limb = i / 8;
            if limb >= self.limbs.len() {
                break;
            }
            *byte = (self.limbs[limb] >> (8 * (i % 8))) as u8;
        }
        Ok(out)
    }

    /// Little-endian magnitude export zero-padded to exactly `len` bytes.
    pub fn to_bytes_le(&self, len: usize) -> Result<Vec<u8>, Error> {
        let mut out = self.to_bytes_be(len)?;
        out.reverse();
        Ok(out)
    }

    /// Minimal big-endian export; the value zero encodes as a single byte.
    pub fn to_bytes_be_min(&self) -> Vec<u8> {
        self.to_bytes_be(self.byte_len()).unwrap()
    }

    fn min_byte_len(&self) -> usize {
        (self.bit_len() as usize + 7) / 8
    }

    /// The magnitude as a machine word, or `None` above 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.limbs.len() > 1 {
            return None;
        }
        Some(self.limbs[0])
    }
}

impl core::fmt::Display for BigInt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_str_radix(10))
    }
}

impl core::fmt::Debug for BigInt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("0x")?;
        f.write_str(&self.abs().to_hex())
    }
}
