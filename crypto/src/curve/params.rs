//! Named curve parameter sets.

use crate::curve::{EdwardsCurve, MontCurve, ShortCurve};
use bignum::BigInt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveId {
    Secp256k1,
    P256,
    P192,
    Curve25519,
    Ed25519,
}

impl CurveId {
    pub const ALL: [CurveId; 5] = [
        CurveId::Secp256k1,
        CurveId::P256,
        CurveId::P192,
        CurveId::Curve25519,
        CurveId::Ed25519,
    ];

    pub fn build(self) -> Curve {
        match self {
            CurveId::Secp256k1 => Curve::Short(secp256k1()),
            CurveId::P256 => Curve::Short(p256()),
            CurveId::P192 => Curve::Short(p192()),
            CurveId::Curve25519 => Curve::Mont(curve25519()),
            CurveId::Ed25519 => Curve::Edwards(ed25519()),
        }
    }
}

pub enum Curve {
    Short(ShortCurve),
    Mont(MontCurve),
    Edwards(EdwardsCurve),
}

fn h(s: &str) -> BigInt {
    BigInt::from_hex(s).expect("curve constant")
}

/// The Bitcoin curve, with its GLV endomorphism: `beta^3 = 1` in the field,
/// `lambda^3 = 1` mod n, and `(x, y) -> (beta*x, y)` multiplies by `lambda`.
pub fn secp256k1() -> ShortCurve {
    let mut curve = ShortCurve::new(
        h("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        BigInt::zero(),
        BigInt::from_u64(7),
        h("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        h("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        h("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
    );
    curve.set_endo(
        h("7ae96a2b657c07106e64479eac3434e99cf0497512f58995c1396c28719501ee"),
        h("5363ad4cc05c30e0a5261c028812645a122e22ea20816678df02967c1b23bd72"),
        [
            (
                h("3086d221a7d46bcde86c90e49284eb15"),
                h("-e4437ed6010e88286f547fa90abfe4c3"),
            ),
            (
                h("114ca50f7a8e2f3f657c1108d9d44cfd8"),
                h("3086d221a7d46bcde86c90e49284eb15"),
            ),
        ],
    );
    curve
}

/// NIST P-256. The prime is not pseudo-Mersenne shaped, so the field runs
/// on Montgomery reduction.
pub fn p256() -> ShortCurve {
    ShortCurve::new(
        h("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        h("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
        h("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
        h("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
        h("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
        h("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
    )
}

/// NIST P-192.
pub fn p192() -> ShortCurve {
    ShortCurve::new(
        h("fffffffffffffffffffffffffffffffeffffffffffffffff"),
        h("fffffffffffffffffffffffffffffffefffffffffffffffc"),
        h("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1"),
        h("ffffffffffffffffffffffff99def836146bc9b1b4d22831"),
        h("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012"),
        h("07192b95ffc8da78631011ed6b24cdd573f977a11e794811"),
    )
}

/// X25519's Montgomery curve `y^2 = x^3 + 486662*x^2 + x` over `2^255 - 19`.
pub fn curve25519() -> MontCurve {
    MontCurve::new(
        h("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
        h("76d06"),
        h("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"),
        BigInt::from_u64(9),
    )
}

/// The Ed25519 twisted Edwards curve, `a = -1`, `d = -121665/121666`.
pub fn ed25519() -> EdwardsCurve {
    let p = h("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");
    let a = &p - &BigInt::one();
    EdwardsCurve::new(
        p,
        a,
        h("52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3"),
        h("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"),
        h("216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a"),
        h("6666666666666666666666666666666666666666666666666666666666666658"),
    )
}
