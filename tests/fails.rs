// Highlights the decode-failure modes the wire codecs are expected to
// reject, exercised as a black box through the public `Signature`/
// `Ciphertext` API rather than through crate internals.

use sm9::codec::{Ciphertext, Signature};
use sm9::Sm9Error;

fn valid_signature_der() -> Vec<u8> {
    // SEQUENCE { OCTET STRING (32 bytes), BIT STRING (0 unused, 65 bytes) }
    let mut der = vec![0x30, 0x64];
    der.push(0x04);
    der.push(0x20);
    der.extend_from_slice(&[0x11u8; 32]);
    der.push(0x03);
    der.push(0x42);
    der.push(0x00);
    der.extend_from_slice(&[0x22u8; 65]);
    der
}

fn valid_ciphertext_der(en_type: u8) -> Vec<u8> {
    let mut body = Vec::new();
    body.push(0x02);
    body.push(0x01);
    body.push(en_type);
    body.push(0x03);
    body.push(0x42);
    body.push(0x00);
    body.extend_from_slice(&[0x33u8; 65]);
    body.push(0x04);
    body.push(0x20);
    body.extend_from_slice(&[0x44u8; 32]);
    body.push(0x04);
    body.push(0x03);
    body.extend_from_slice(&[1, 2, 3]);

    let mut der = vec![0x30];
    der.push(body.len() as u8);
    der.extend_from_slice(&body);
    der
}

#[test]
fn signature_round_trips_through_the_public_api() {
    let der = valid_signature_der();
    assert!(Signature::from_der(&der).is_ok());
}

#[test]
fn signature_rejects_garbage() {
    for seed in 0u8..20 {
        let garbage = vec![seed; 40 + seed as usize];
        assert!(Signature::from_der(&garbage).is_err());
    }
}

#[test]
fn signature_rejects_truncated_der() {
    let der = valid_signature_der();
    for cut in 1..der.len() {
        assert!(Signature::from_der(&der[..cut]).is_err());
    }
}

#[test]
fn signature_rejects_trailing_bytes() {
    let mut der = valid_signature_der();
    der.push(0);
    let err = Signature::from_der(&der).unwrap_err();
    assert_eq!(err, Sm9Error::TrailingData);
}

#[test]
fn ciphertext_round_trips_through_the_public_api() {
    let der = valid_ciphertext_der(0);
    assert!(Ciphertext::from_der(&der).is_ok());
}

#[test]
fn ciphertext_rejects_unsupported_en_type() {
    let der = valid_ciphertext_der(1);
    let err = Ciphertext::from_der(&der).unwrap_err();
    assert_eq!(err, Sm9Error::WrongEncType);
}

#[test]
fn ciphertext_rejects_garbage() {
    for seed in 0u8..20 {
        let garbage = vec![seed.wrapping_mul(7); 50 + seed as usize];
        assert!(Ciphertext::from_der(&garbage).is_err());
    }
}
