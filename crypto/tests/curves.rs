use bignum::BigInt;
use crypto::curve::params::{curve25519, ed25519, p192, p256, secp256k1};
use crypto::curve::{Curve, CurveId, ShortCurve};

fn xorshift(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

fn random_scalar(state: &mut u64, bits: u32) -> BigInt {
    let limbs = (bits as usize + 63) / 64;
    let bytes: Vec<u8> = (0..limbs)
        .flat_map(|_| xorshift(state).to_le_bytes())
        .collect();
    BigInt::from_bytes_le(&bytes).mask_bits(bits)
}

fn short_curves() -> Vec<(&'static str, ShortCurve)> {
    vec![
        ("secp256k1", secp256k1()),
        ("p256", p256()),
        ("p192", p192()),
    ]
}

#[test]
fn generators_are_valid_and_have_the_stated_order() {
    for (name, c) in short_curves() {
        assert!(c.validate(c.generator()), "{name}");
        assert!(c.mul_g(c.order()).is_infinity(), "{name} fixed base");
        assert!(c.mul(c.generator(), c.order()).is_infinity(), "{name} generic");
        let minus_g = c.mul(c.generator(), &(c.order() - &BigInt::one()));
        assert!(c.eq(&minus_g, &c.neg(c.generator())), "{name} n-1");
    }
}

#[test]
fn dbl_matches_add_on_random_points() {
    for (name, c) in short_curves() {
        let mut state = 0x2545_f491_4f6c_dd1du64;
        for i in 0..100 {
            let p = c.mul_g(&random_scalar(&mut state, c.order().bit_len()));
            assert!(c.eq(&c.dbl(&p), &c.add(&p, &p)), "{name} case {i}");
        }
    }
}

#[test]
fn order_annihilates_random_points() {
    for (name, c) in short_curves() {
        let mut state = 0x853c_49e6_748f_ea9bu64;
        for i in 0..50 {
            let p = c.mul_g(&random_scalar(&mut state, c.order().bit_len()));
            assert!(c.mul(&p, c.order()).is_infinity(), "{name} case {i}");
        }
    }
}

#[test]
fn fixed_base_matches_generic_mul() {
    for (name, c) in short_curves() {
        let mut state = 0x9e37_79b9_7f4a_7c15u64;
        for i in 0..4 {
            let k = random_scalar(&mut state, c.order().bit_len());
            let a = c.mul_g(&k);
            let b = c.mul(c.generator(), &k);
            assert!(c.eq(&a, &b), "{name} case {i}");
        }
    }
}

#[test]
fn mul_is_a_group_homomorphism() {
    // a*(P) + b*(P) == (a+b)*P exercises wNAF, the GLV path on secp256k1,
    // and the addition formulas together.
    for (name, c) in short_curves() {
        let mut state = 0x0123_4567_89ab_cdefu64;
        let q = c.mul_g(&random_scalar(&mut state, c.order().bit_len()));
        for i in 0..3 {
            let a = random_scalar(&mut state, c.order().bit_len());
            let b = random_scalar(&mut state, c.order().bit_len());
            let lhs = c.add(&c.mul(&q, &a), &c.mul(&q, &b));
            let rhs = c.mul(&q, &(&a + &b));
            assert!(c.eq(&lhs, &rhs), "{name} case {i}");
        }
    }
}

#[test]
fn joint_mul_matches_separate_muls() {
    for (name, c) in short_curves() {
        let mut state = 0xdead_beef_cafe_f00du64;
        let q = c.mul_g(&random_scalar(&mut state, c.order().bit_len()));
        for i in 0..3 {
            let k1 = random_scalar(&mut state, c.order().bit_len());
            let k2 = random_scalar(&mut state, c.order().bit_len());
            let joint = c.mul_add(&k1, c.generator(), &k2, &q);
            let split = c.add(&c.mul(c.generator(), &k1), &c.mul(&q, &k2));
            assert!(c.eq(&joint, &split), "{name} case {i}");
        }
    }
}

#[test]
fn sec1_codec_roundtrips() {
    for (name, c) in short_curves() {
        let mut state = 0x5555_aaaa_5555_aaaau64;
        for i in 0..3 {
            let p = c.mul_g(&random_scalar(&mut state, c.order().bit_len()));
            for compress in [true, false] {
                let enc = c.encode_point(&p, compress);
                let dec = c.decode_point(&enc).unwrap();
                assert!(c.eq(&dec, &p), "{name} case {i} compress {compress}");
            }
            // hybrid form
            let mut enc = c.encode_point(&p, false);
            let (_, y) = c.affine(&p).unwrap();
            enc[0] = if y.is_odd() { 0x07 } else { 0x06 };
            assert!(c.eq(&c.decode_point(&enc).unwrap(), &p), "{name} hybrid");
            // hybrid with the wrong parity bit must fail
            enc[0] ^= 0x01;
            assert!(c.decode_point(&enc).is_err(), "{name} hybrid parity");
        }
    }
}

#[test]
fn sec1_decode_rejects_malformed_input() {
    let c = secp256k1();
    let enc = c.encode_point(c.generator(), false);
    // unknown tag
    let mut bad = enc.clone();
    bad[0] = 0x05;
    assert!(c.decode_point(&bad).is_err());
    // wrong length
    assert!(c.decode_point(&enc[..enc.len() - 1]).is_err());
    assert!(c.decode_point(&[]).is_err());
    // y off the curve
    let mut bad = enc.clone();
    bad[64] ^= 0x01;
    assert!(c.decode_point(&bad).is_err());
    // compressed x outside the field
    let mut bad = vec![0x02];
    bad.extend_from_slice(&[0xff; 32]);
    assert!(c.decode_point(&bad).is_err());
}

#[test]
fn ladder_composes_on_curve25519() {
    let c = curve25519();
    let mut state = 0x1357_9bdf_2468_aceeu64;
    for i in 0..3 {
        let k1 = random_scalar(&mut state, 200);
        let k2 = random_scalar(&mut state, 200);
        let lhs = c.mul(&c.mul(c.generator(), &k1), &k2);
        let rhs = c.mul(c.generator(), &(&k1 * &k2));
        assert!(c.eq(&lhs, &rhs), "case {i}");
        assert_eq!(c.affine_x(&lhs), c.affine_x(&rhs), "case {i} affine");
    }
}

#[test]
fn curve25519_wire_roundtrip() {
    let c = curve25519();
    let p = c.mul(c.generator(), &BigInt::from_u64(31));
    let enc = c.encode_point(&p).unwrap();
    assert_eq!(enc.len(), 32);
    assert!(c.eq(&c.decode_point(&enc).unwrap(), &p));
    assert!(c.encode_point(&c.infinity()).is_err());
    assert!(c.decode_point(&enc[..31]).is_err());
}

#[test]
fn ed25519_group_structure() {
    let c = ed25519();
    let g = c.generator();
    assert!(c.validate(g));
    assert!(c.eq(&c.dbl(g), &c.add(g, g)));
    assert!(c.mul(g, c.order()).is_identity());
    assert!(c.add(g, &c.neg(g)).is_identity());
}

#[test]
fn ed25519_codec_roundtrips() {
    let c = ed25519();
    let mut state = 0x0f0f_f0f0_1234_5678u64;
    for i in 0..3 {
        let p = c.mul(c.generator(), &random_scalar(&mut state, 250));
        let enc = c.encode_point(&p);
        assert_eq!(enc.len(), 32, "case {i}");
        assert!(c.eq(&c.decode_point(&enc).unwrap(), &p), "case {i}");
    }
    // y at or above the field prime is rejected
    assert!(c.decode_point(&[0xff; 32]).is_err());
}

#[test]
fn curve_registry_builds_every_family() {
    for id in CurveId::ALL {
        match (id, id.build()) {
            (CurveId::Secp256k1 | CurveId::P256 | CurveId::P192, Curve::Short(c)) => {
                assert!(c.validate(c.generator()));
            }
            (CurveId::Curve25519, Curve::Mont(c)) => {
                assert!(!c.generator().is_infinity());
            }
            (CurveId::Ed25519, Curve::Edwards(c)) => {
                assert!(c.validate(c.generator()));
            }
            (id, _) => panic!("{id:?} built the wrong family"),
        }
    }
}
