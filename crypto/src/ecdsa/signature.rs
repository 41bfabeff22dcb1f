//! ECDSA signature value and its wire codecs.

use crate::Error;
use alloc::vec::Vec;
use bignum::BigInt;

/// An `(r, s)` pair, optionally tagged with the public-key recovery id
/// produced at signing time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: BigInt,
    pub s: BigInt,
    pub recovery_param: Option<u8>,
}

impl Signature {
    pub fn new(r: BigInt, s: BigInt) -> Self {
        Self {
            r,
            s,
            recovery_param: None,
        }
    }

    // ---- DER ----

    /// Strict DER: minimal lengths, minimal integer encodings, no negative
    /// values, no trailing bytes.
    pub fn from_der(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.first() != Some(&0x30) {
            return Err(Error::InvalidSignature);
        }
        let (body_len, pos) = read_len(bytes, 1)?;
        if bytes.len() != pos + body_len {
            return Err(Error::InvalidSignature);
        }
        let (r, pos) = parse_int(bytes, pos)?;
        let (s, pos) = parse_int(bytes, pos)?;
        if pos != bytes.len() {
            return Err(Error::InvalidSignature);
        }
        Ok(Self::new(r, s))
    }

    pub fn to_der(&self) -> Vec<u8> {
        let r = int_bytes(&self.r);
        let s = int_bytes(&self.s);
        let body_len = 2 + r.len() + 2 + s.len();
        let mut out = Vec::with_capacity(body_len + 3);
        out.push(0x30);
        push_len(&mut out, body_len);
        out.push(0x02);
        push_len(&mut out, r.len());
        out.extend_from_slice(&r);
        out.push(0x02);
        push_len(&mut out, s.len());
        out.extend_from_slice(&s);
        out
    }

    // ---- fixed-width compact form ----

    /// `r || s`, each zero-padded big-endian to 32 bytes.
    pub fn from_raw(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 64 {
            return Err(Error::InvalidSignature);
        }
        Ok(Self::new(
            BigInt::from_bytes_be(&bytes[..32]),
            BigInt::from_bytes_be(&bytes[32..]),
        ))
    }

    pub fn to_raw(&self) -> Result<[u8; 64], Error> {
        let mut out = [0u8; 64];
        let r = self.r.to_bytes_be(32).map_err(|_| Error::InvalidSignature)?;
        let s = self.s.to_bytes_be(32).map_err(|_| Error::InvalidSignature)?;
        out[..32].copy_from_slice(&r);
        out[32..].copy_from_slice(&s);
        Ok(out)
    }
}

/// Short-form length, or the single long form (`0x81`) realistic signature
/// sizes can need. Rejects non-minimal encodings.
fn read_len(bytes: &[u8], pos: usize) -> Result<(usize, usize), Error> {
    let b = *bytes.get(pos).ok_or(Error::InvalidSignature)?;
    if b < 0x80 {
        return Ok((b as usize, pos + 1));
    }
    if b == 0x81 {
        let l = *bytes.get(pos + 1).ok_or(Error::InvalidSignature)? as usize;
        if l < 0x80 {
            return Err(Error::InvalidSignature);
        }
        return Ok((l, pos + 2));
    }
    Err(Error::InvalidSignature)
}

fn push_len(out: &mut Vec<u8>, len: usize) {
    debug_assert!(len < 256);
    if len < 0x80 {
        out.push(len as u8);
    } else {
        out.push(0x81);
        out.push(len as u8);
    }
}

fn parse_int(bytes: &[u8], pos: usize) -> Result<(BigInt, usize), Error> {
    if bytes.get(pos) != Some(&0x02) {
        return Err(Error::InvalidSignature);
    }
    let (len, pos) = read_len(bytes, pos + 1)?;
    let end = pos + len;
    let slice = bytes.get(pos..end).ok_or(Error::InvalidSignature)?;
    if slice.is_empty() || slice[0] & 0x80 != 0 {
        return Err(Error::InvalidSignature);
    }
    if slice.len() > 1 && slice[0] == 0 && slice[1] & 0x80 == 0 {
        return Err(Error::InvalidSignature);
    }
    Ok((BigInt::from_bytes_be(slice), end))
}

/// Minimal DER integer content: a leading zero only to keep the high bit
/// clear.
fn int_bytes(v: &BigInt) -> Vec<u8> {
    let b = v.to_bytes_be_min();
    if b[0] & 0x80 != 0 {
        let mut padded = Vec::with_capacity(b.len() + 1);
        padded.push(0x00);
        padded.extend_from_slice(&b);
        padded
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(r: u64, s: u64) -> Signature {
        Signature::new(BigInt::from_u64(r), BigInt::from_u64(s))
    }

    #[test]
    fn der_roundtrip() {
        for (r, s) in [(1u64, 1u64), (0x7f, 0x80), (0xdead_beef, 1), (0, 5)] {
            let v = sig(r, s);
            assert_eq!(Signature::from_der(&v.to_der()).unwrap(), v, "({r}, {s})");
        }
    }

    #[test]
    fn der_pads_high_bit_values() {
        let der = sig(0x80, 1).to_der();
        // 30 07 02 02 00 80 02 01 01
        assert_eq!(der, [0x30, 0x07, 0x02, 0x02, 0x00, 0x80, 0x02, 0x01, 0x01]);
        assert_eq!(Signature::from_der(&der).unwrap(), sig(0x80, 1));
    }

    #[test]
    fn der_rejects_malformed_input() {
        let good = sig(0x1234, 0x56).to_der();
        // wrong outer tag
        let mut bad = good.clone();
        bad[0] = 0x31;
        assert!(Signature::from_der(&bad).is_err());
        // truncated
        assert!(Signature::from_der(&good[..good.len() - 1]).is_err());
        // trailing garbage
        let mut bad = good.clone();
        bad.push(0x00);
        assert!(Signature::from_der(&bad).is_err());
        // negative integer
        assert!(Signature::from_der(&[0x30, 0x06, 0x02, 0x01, 0x80, 0x02, 0x01, 0x01]).is_err());
        // padded integer
        assert!(
            Signature::from_der(&[0x30, 0x07, 0x02, 0x02, 0x00, 0x01, 0x02, 0x01, 0x01]).is_err()
        );
        // non-minimal long-form length
        assert!(Signature::from_der(&[0x30, 0x81, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01]).is_err());
    }

    #[test]
    fn raw_roundtrip_and_width() {
        let v = sig(0x0123_4567_89ab_cdef, 0xff);
        let raw = v.to_raw().unwrap();
        assert_eq!(raw.len(), 64);
        assert_eq!(Signature::from_raw(&raw).unwrap(), v);
        assert!(Signature::from_raw(&raw[..63]).is_err());
    }

    #[test]
    fn raw_rejects_oversized_components() {
        let wide = BigInt::from_bytes_be(&[0xff; 33]);
        let v = Signature::new(wide, BigInt::one());
        assert!(v.to_raw().is_err());
    }
}
