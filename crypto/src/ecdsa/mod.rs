//! Deterministic ECDSA over short Weierstrass curves.
//!
//! Nonces come from an HMAC-SHA-256 DRBG keyed with the private scalar and
//! the message digest, so equal inputs always produce the same signature.
//! Signatures are canonicalized to the low-s half and carry a recovery id,
//! from which the public key can be reconstructed without being transmitted.

mod signature;

pub use signature::Signature;

use crate::curve::{Point, ShortCurve};
use crate::drbg::HmacDrbg;
use crate::Error;
use alloc::vec;
use alloc::vec::Vec;
use bignum::{BigInt, ReduceCtx};
use core::cell::OnceCell;
use core::cmp::Ordering;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// Signing/verification engine bound to one curve. Scalar arithmetic mod n
/// runs through its own reduction context, separate from the curve's field.
pub struct Ecdsa<'a> {
    curve: &'a ShortCurve,
    scalar: ReduceCtx,
}

/// A private scalar, a public point, or both; the public half is derived
/// on first use. The private scalar is wiped on drop.
pub struct KeyPair {
    private: Option<BigInt>,
    public: OnceCell<Point>,
}

impl KeyPair {
    pub fn has_private(&self) -> bool {
        self.private.is_some()
    }

    pub fn private(&self) -> Option<&BigInt> {
        self.private.as_ref()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        if let Some(d) = &mut self.private {
            d.zeroize();
        }
    }
}

impl<'a> Ecdsa<'a> {
    pub fn new(curve: &'a ShortCurve) -> Self {
        Self {
            scalar: ReduceCtx::new(curve.order().clone()),
            curve,
        }
    }

    pub fn curve(&self) -> &ShortCurve {
        self.curve
    }

    // ---- keys ----

    pub fn key_from_private(&self, d: &BigInt) -> Result<KeyPair, Error> {
        if !self.scalar_in_range(d) {
            return Err(Error::InvalidPrivateKey);
        }
        Ok(KeyPair {
            private: Some(d.clone()),
            public: OnceCell::new(),
        })
    }

    /// All shipped Weierstrass curves have cofactor 1, so membership in the
    /// prime-order subgroup follows from the curve equation.
    pub fn key_from_public(&self, q: &Point) -> Result<KeyPair, Error> {
        if q.is_infinity() || !self.curve.validate(q) {
            return Err(Error::InvalidPoint);
        }
        Ok(KeyPair {
            private: None,
            public: OnceCell::from(q.clone()),
        })
    }

    pub fn key_from_encoded(&self, bytes: &[u8]) -> Result<KeyPair, Error> {
        let q = self.curve.decode_point(bytes)?;
        self.key_from_public(&q)
    }

    pub fn gen_key_pair<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> KeyPair {
        let mut buf = vec![0u8; self.curve.order().byte_len() + 8];
        rng.fill_bytes(&mut buf);
        let d = self.scalar_from_wide_bytes(&buf);
        buf.zeroize();
        KeyPair {
            private: Some(d),
            public: OnceCell::new(),
        }
    }

    /// Deterministic key generation from caller-supplied entropy, via the
    /// same DRBG construction the signer uses.
    pub fn gen_key_pair_from_entropy(&self, entropy: &[u8], pers: &[u8]) -> Result<KeyPair, Error> {
        let mut drbg = HmacDrbg::new(entropy, b"key generation", pers);
        let buf = drbg.generate(self.curve.order().byte_len() + 8, None)?;
        Ok(KeyPair {
            private: Some(self.scalar_from_wide_bytes(&buf)),
            public: OnceCell::new(),
        })
    }

    /// Uniform-enough scalar in `[1, n)` from an oversampled byte string.
    fn scalar_from_wide_bytes(&self, bytes: &[u8]) -> BigInt {
        let one = BigInt::one();
        let nm1 = self.curve.order() - &one;
        // n > 1, so nm1 >= 1
        &BigInt::from_bytes_be(bytes).umod(&nm1).unwrap() + &one
    }

    pub fn public_key<'k>(&self, key: &'k KeyPair) -> &'k Point {
        key.public.get_or_init(|| {
            let d = key
                .private
                .as_ref()
                .expect("key pair holds a private or a public part");
            self.curve.mul_g(d)
        })
    }

    pub fn encode_public_key(&self, key: &KeyPair, compress: bool) -> Vec<u8> {
        self.curve.encode_point(self.public_key(key), compress)
    }

    // ---- signing ----

    pub fn sign(&self, digest: &[u8], key: &KeyPair) -> Result<Signature, Error> {
        let d = key.private.as_ref().ok_or(Error::InvalidPrivateKey)?;
        let n = self.curve.order();
        let blen = n.byte_len();
        let e = self.truncate_to_n(&BigInt::from_bytes_be(digest), false);
        // d < n and e < n, so both fit blen bytes
        let priv_bytes = d.to_bytes_be(blen).unwrap();
        let e_bytes = e.to_bytes_be(blen).unwrap();
        let mut drbg = HmacDrbg::new(&priv_bytes, &e_bytes, &[]);
        let one = BigInt::one();
        let ns1 = n - &one;

        for _ in 0..64 {
            let k = self.truncate_to_n(&BigInt::from_bytes_be(&drbg.generate(blen, None)?), true);
            if !(k.cmp(&one) == Ordering::Greater && k.cmp(&ns1) == Ordering::Less) {
                continue;
            }
            let kp = self.curve.mul_g(&k);
            if kp.is_infinity() {
                continue;
            }
            let (kx, ky) = self.curve.affine(&kp).unwrap();
            let r = kx.umod(n).unwrap();
            if r.is_zero() {
                continue;
            }
            // s = k^-1 * (r*d + e) mod n
            let sc = &self.scalar;
            let rd_e = sc.add(&sc.mul(&sc.enter(&r), &sc.enter(d)), &sc.enter(&e));
            let mut s = sc.exit(&sc.mul(&sc.invert(&sc.enter(&k)), &rd_e));
            if s.is_zero() {
                continue;
            }
            let mut recovery =
                ky.is_odd() as u8 | (((kx.ucmp(&r) != Ordering::Equal) as u8) << 1);
            // canonical low-s form; mirroring s negates the nonce point
            if s.ucmp(&self.curve.nh) == Ordering::Greater {
                s = n - &s;
                recovery ^= 1;
            }
            return Ok(Signature {
                r,
                s,
                recovery_param: Some(recovery),
            });
        }
        Err(Error::InvalidSignature)
    }

    // ---- verification ----

    pub fn verify(&self, digest: &[u8], sig: &Signature, key: &KeyPair) -> bool {
        if !self.scalar_in_range(&sig.r) || !self.scalar_in_range(&sig.s) {
            return false;
        }
        let q = self.public_key(key);
        let e = self.truncate_to_n(&BigInt::from_bytes_be(digest), false);
        let sc = &self.scalar;
        let sinv = sc.invert(&sc.enter(&sig.s));
        let u1 = sc.exit(&sc.mul(&sinv, &sc.enter(&e)));
        let u2 = sc.exit(&sc.mul(&sinv, &sc.enter(&sig.r)));
        let jr = self
            .curve
            .jmul_add(&u1, self.curve.generator(), &u2, q);
        if jr.is_infinity() {
            return false;
        }
        // compare x coordinates without leaving Jacobian space
        self.curve.eq_x_to_p(&jr, &sig.r)
    }

    // ---- recovery ----

    /// Reconstructs the public key from a signature carrying a recovery id.
    pub fn recover(&self, digest: &[u8], sig: &Signature) -> Result<Point, Error> {
        let param = sig.recovery_param.ok_or(Error::InvalidSignature)?;
        if param > 3 || !self.scalar_in_range(&sig.r) || !self.scalar_in_range(&sig.s) {
            return Err(Error::InvalidSignature);
        }
        let n = self.curve.order();
        let y_odd = param & 1 == 1;
        let second_key = param >> 1 == 1;
        // a second candidate x = r + n only exists below p
        if second_key {
            let p_mod_n = self.curve.field_modulus().umod(n).unwrap();
            if sig.r.ucmp(&p_mod_n) != Ordering::Less {
                return Err(Error::InvalidSignature);
            }
        }
        let rx = if second_key {
            &sig.r + n
        } else {
            sig.r.clone()
        };
        let rp = self.curve.point_from_x(&rx, y_odd)?;

        let e = self.truncate_to_n(&BigInt::from_bytes_be(digest), false);
        let sc = &self.scalar;
        let rinv = sc.invert(&sc.enter(&sig.r));
        // Q = r^-1 * (s*R - e*G)
        let u1 = sc.exit(&sc.mul(&sc.neg(&sc.enter(&e)), &rinv));
        let u2 = sc.exit(&sc.mul(&sc.enter(&sig.s), &rinv));
        Ok(self
            .curve
            .mul_add(&u1, self.curve.generator(), &u2, &rp))
    }

    /// Finds the recovery id matching a known public key, the way a signer
    /// without stored recovery data has to.
    pub fn recovery_param(&self, digest: &[u8], sig: &Signature, q: &Point) -> Result<u8, Error> {
        for i in 0..4u8 {
            let candidate = Signature {
                r: sig.r.clone(),
                s: sig.s.clone(),
                recovery_param: Some(i),
            };
            if let Ok(p) = self.recover(digest, &candidate) {
                if self.curve.eq(&p, q) {
                    return Ok(i);
                }
            }
        }
        Err(Error::InvalidSignature)
    }

    // ---- helpers ----

    fn scalar_in_range(&self, v: &BigInt) -> bool {
        !v.is_negative() && !v.is_zero() && v.ucmp(self.curve.order()) == Ordering::Less
    }

    /// Keeps the leftmost `bitlen(n)` bits of the digest, then one
    /// conditional subtraction unless `trunc_only`.
    fn truncate_to_n(&self, msg: &BigInt, trunc_only: bool) -> BigInt {
        let n = self.curve.order();
        let delta = msg.byte_len() as i64 * 8 - n.bit_len() as i64;
        let mut msg = if delta > 0 {
            msg.shr(delta as u32)
        } else {
            msg.clone()
        };
        if !trunc_only && msg.ucmp(n) != Ordering::Less {
            msg.sub_assign(n);
        }
        msg
    }
}
