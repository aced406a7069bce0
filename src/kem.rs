//! Key encapsulation (GM/T 0044 §5, the "key encapsulation mechanism").

use core::fmt;

use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, Sm9Error};
use crate::hash::{hash_to_scalar, kdf};
use crate::keys::{EncKey, EncMasterPubKey};
use crate::primitives::{p1, p2, pairing, FnElem, G1Point};

/// Domain separator for the encryption scheme's `H1` call.
pub const HID_ENC: u8 = 0x03;

const MAX_RESAMPLE_ITERATIONS: usize = 256;

/// A derived symmetric key. Zeroized on drop; equality is constant-time.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Returns the raw shared-secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

impl subtle::ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        if self.0.len() != other.0.len() {
            return subtle::Choice::from(0);
        }
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        bool::from(subtle::ConstantTimeEq::ct_eq(self, other))
    }
}
impl Eq for SharedSecret {}

/// `Encap`'s ciphertext half: the G1 point `C1` a recipient needs to
/// recover the shared key.
pub struct Encapsulation {
    /// The uncompressed 65-byte encoding of `C1 = [r] QB`.
    pub c1: [u8; 65],
}

fn recipient_point(id: &[u8], master_pub: &EncMasterPubKey) -> G1Point {
    let mut z = id.to_vec();
    z.push(HID_ENC);
    let h1 = hash_to_scalar(&z);
    p1().mul(&h1).add(master_pub.point())
}

/// Encapsulates a `klen`-byte shared secret for recipient `id`.
pub fn encapsulate_with_rng(
    rng: &mut impl CryptoRngCore, id: &[u8], master_pub: &EncMasterPubKey, klen: usize,
) -> Result<(SharedSecret, Encapsulation)> {
    let q_b = recipient_point(id, master_pub);
    let g = pairing(&p2(), master_pub.point());

    for _ in 0..MAX_RESAMPLE_ITERATIONS {
        let mut r = FnElem::random(rng)?;
        let c1 = q_b.mul(&r);
        let w = g.pow(&r.to_bytes());
        r.zeroize();

        let c1_bytes = c1.to_uncompressed_octets();
        let mut z = Vec::with_capacity(64 + 384 + id.len());
        z.extend_from_slice(&c1_bytes[1..]); // strip the 0x04 tag; only X||Y feeds the KDF
        z.extend_from_slice(&w.to_bytes());
        z.extend_from_slice(id);
        let k = kdf(&z, klen);
        if k.iter().all(|&b| b == 0) {
            continue;
        }
        return Ok((SharedSecret(k), Encapsulation { c1: c1_bytes }));
    }
    Err(Sm9Error::ResampleExhausted)
}

/// Encapsulates a `klen`-byte shared secret using the system RNG.
#[cfg(feature = "default-rng")]
pub fn encapsulate(
    id: &[u8], master_pub: &EncMasterPubKey, klen: usize,
) -> Result<(SharedSecret, Encapsulation)> {
    encapsulate_with_rng(&mut rand_core::OsRng, id, master_pub, klen)
}

/// Recovers the shared secret an [`Encapsulation`] carries, for the holder
/// of private key `dec_key`.
pub fn decapsulate(
    encapsulation: &Encapsulation, id: &[u8], dec_key: &EncKey, klen: usize,
) -> Result<SharedSecret> {
    let c1 = G1Point::from_uncompressed_octets(&encapsulation.c1)?;
    let w = pairing(dec_key.point(), &c1);

    let mut z = Vec::with_capacity(64 + 384 + id.len());
    z.extend_from_slice(&encapsulation.c1[1..]); // strip the 0x04 tag; only X||Y feeds the KDF
    z.extend_from_slice(&w.to_bytes());
    z.extend_from_slice(id);
    let k = kdf(&z, klen);
    if k.iter().all(|&b| b == 0) {
        return Err(Sm9Error::KeyZero);
    }
    Ok(SharedSecret(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::fixtures::enc_keypair;
    use crate::primitives::FnElem;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn encap_decap_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let master_secret = FnElem::random(&mut rng).unwrap();
        let (master_pub, dec_key) = enc_keypair(&master_secret, b"Bob", HID_ENC);

        let (k_sender, encaps) =
            encapsulate_with_rng(&mut rng, b"Bob", &master_pub, 48).unwrap();
        let k_receiver = decapsulate(&encaps, b"Bob", &dec_key, 48).unwrap();
        assert_eq!(k_sender, k_receiver);
    }

    #[test]
    fn decap_rejects_wrong_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let master_secret = FnElem::random(&mut rng).unwrap();
        let (master_pub, _) = enc_keypair(&master_secret, b"Bob", HID_ENC);
        let (_, bob_key) = enc_keypair(&master_secret, b"Bob", HID_ENC);
        let (_, carol_key) = enc_keypair(&master_secret, b"Carol", HID_ENC);

        let (k_sender, encaps) =
            encapsulate_with_rng(&mut rng, b"Bob", &master_pub, 32).unwrap();
        let k_bob = decapsulate(&encaps, b"Bob", &bob_key, 32).unwrap();
        assert_eq!(k_sender, k_bob);

        // Carol's key does not correspond to the identity the ciphertext was
        // encapsulated for, so she must not recover the same secret.
        let k_carol = decapsulate(&encaps, b"Bob", &carol_key, 32).unwrap();
        assert_ne!(k_sender, k_carol);
    }
}
