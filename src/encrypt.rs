//! The XOR-stream encryption envelope (GM/T 0044 §7), built directly on
//! top of the [`crate::kem`] key encapsulation mechanism: `Encap`/`Decap`
//! produce a one-time key `K = K1 || K2`, `K1` masks the plaintext with
//! XOR and `K2` keys an HMAC-SM3 tag over the resulting ciphertext.
//!
//! `EnType = 0` (XOR-stream) is the only cipher this envelope speaks; an
//! unrecognized `EnType` on the wire is a decode error, not a dispatch
//! table miss.

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;

use crate::codec::Ciphertext;
use crate::error::{Result, Sm9Error};
use crate::hash::hmac_sm3;
use crate::kem::{self, Encapsulation};
use crate::keys::{EncKey, EncMasterPubKey};

/// The largest plaintext this envelope accepts, matching the GmSSL encoder
/// this crate's wire format is grounded on.
pub const MAX_PLAINTEXT_SIZE: usize = 255;

/// Encrypts `plaintext` for recipient `id` under `master_pub`, drawing
/// randomness from `rng`.
pub fn encrypt_with_rng(
    rng: &mut impl CryptoRngCore, id: &[u8], master_pub: &EncMasterPubKey, plaintext: &[u8],
) -> Result<Ciphertext> {
    if plaintext.len() > MAX_PLAINTEXT_SIZE {
        return Err(Sm9Error::SizeExceeded);
    }
    let klen = plaintext.len() + 32;
    let (k, encapsulation) = kem::encapsulate_with_rng(rng, id, master_pub, klen)?;
    let k_bytes = k.as_bytes();
    let (k1, k2) = k_bytes.split_at(plaintext.len());

    let c2: Vec<u8> = plaintext.iter().zip(k1).map(|(&m, &k)| m ^ k).collect();
    let c3 = hmac_sm3(k2, &c2);
    Ok(Ciphertext::new(encapsulation.c1, c3, c2))
}

/// Encrypts `plaintext` for recipient `id` under `master_pub`, using the
/// system RNG.
#[cfg(feature = "default-rng")]
pub fn encrypt(id: &[u8], master_pub: &EncMasterPubKey, plaintext: &[u8]) -> Result<Ciphertext> {
    encrypt_with_rng(&mut rand_core::OsRng, id, master_pub, plaintext)
}

/// Decrypts `ciphertext` for identity `id`, holding private key `dec_key`.
///
/// Fails with [`Sm9Error::MacMismatch`] if the HMAC-SM3 tag does not match
/// — checked with a constant-time comparison before any plaintext is
/// returned to the caller.
pub fn decrypt(dec_key: &EncKey, id: &[u8], ciphertext: &Ciphertext) -> Result<Vec<u8>> {
    let c2len = ciphertext.c2.len();
    let klen = c2len + 32;
    let encapsulation = Encapsulation { c1: ciphertext.c1 };
    let k = kem::decapsulate(&encapsulation, id, dec_key, klen)?;
    let k_bytes = k.as_bytes();
    let (k1, k2) = k_bytes.split_at(c2len);

    let mac = hmac_sm3(k2, &ciphertext.c2);
    if !bool::from(mac.ct_eq(&ciphertext.c3)) {
        return Err(Sm9Error::MacMismatch);
    }
    Ok(ciphertext.c2.iter().zip(k1).map(|(&c, &k)| c ^ k).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::fixtures::enc_keypair;
    use crate::primitives::FnElem;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(seed: u64, id: &[u8]) -> (EncMasterPubKey, EncKey, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let master_secret = FnElem::random(&mut rng).unwrap();
        let (master_pub, dec_key) = enc_keypair(&master_secret, id, kem::HID_ENC);
        (master_pub, dec_key, rng)
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let (master_pub, dec_key, mut rng) = setup(10, b"Bob");
        let plaintext = b"Chinese IBE standard";
        let ciphertext = encrypt_with_rng(&mut rng, b"Bob", &master_pub, plaintext).unwrap();
        let recovered = decrypt(&dec_key, b"Bob", &ciphertext).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let (master_pub, dec_key, mut rng) = setup(11, b"Bob");
        let ciphertext = encrypt_with_rng(&mut rng, b"Bob", &master_pub, b"").unwrap();
        let recovered = decrypt(&dec_key, b"Bob", &ciphertext).unwrap();
        assert!(recovered.is_empty());
    }

    #[test]
    fn oversized_plaintext_is_rejected() {
        let (master_pub, _dec_key, mut rng) = setup(12, b"Bob");
        let plaintext = vec![0u8; MAX_PLAINTEXT_SIZE + 1];
        let err = encrypt_with_rng(&mut rng, b"Bob", &master_pub, &plaintext).unwrap_err();
        assert_eq!(err, Sm9Error::SizeExceeded);
    }

    #[test]
    fn tampered_tag_is_rejected() {
        let (master_pub, dec_key, mut rng) = setup(13, b"Bob");
        let mut ciphertext =
            encrypt_with_rng(&mut rng, b"Bob", &master_pub, b"Chinese IBE standard").unwrap();
        ciphertext.c3[0] ^= 1;
        let err = decrypt(&dec_key, b"Bob", &ciphertext).unwrap_err();
        assert_eq!(err, Sm9Error::MacMismatch);
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let (master_pub, dec_key, mut rng) = setup(14, b"Bob");
        let mut ciphertext =
            encrypt_with_rng(&mut rng, b"Bob", &master_pub, b"Chinese IBE standard").unwrap();
        ciphertext.c2[0] ^= 1;
        let err = decrypt(&dec_key, b"Bob", &ciphertext).unwrap_err();
        assert_eq!(err, Sm9Error::MacMismatch);
    }

    #[test]
    fn tampered_c1_is_rejected() {
        let (master_pub, dec_key, mut rng) = setup(15, b"Bob");
        let mut ciphertext =
            encrypt_with_rng(&mut rng, b"Bob", &master_pub, b"Chinese IBE standard").unwrap();
        ciphertext.c1[1] ^= 1;
        // A flipped C1 either fails the on-curve check inside Decap or
        // derives the wrong key, either way producing a caller-visible error.
        assert!(decrypt(&dec_key, b"Bob", &ciphertext).is_err());
    }
}
