//! Streaming sign/verify over SM9 (GM/T 0044 §5).
//!
//! Both [`SignContext`] and [`VerifyContext`] absorb the message
//! incrementally via `update`, then finalize once the pairing value `w`
//! (which needs a full scalar multiplication and a pairing evaluation, not
//! just message bytes) is available. The message is hashed exactly once;
//! `H2`'s two internal digests are produced by cloning the streamed SM3
//! state rather than re-absorbing the message.

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::codec::Signature;
use crate::error::{Result, Sm9Error};
use crate::hash::{hash_to_scalar, hash_to_scalar_from_ctx, Sm3Ctx, HASH2_PREFIX};
use crate::keys::{SignKey, SignMasterPubKey};
use crate::primitives::{p1, pairing, FnElem};

/// Domain separator for the signature scheme's `H1` call.
pub const HID_SIGN: u8 = 0x01;

const MAX_RESAMPLE_ITERATIONS: usize = 256;

/// Accumulates a message to be signed.
///
/// ```
/// # use sm9::sign::SignContext;
/// let mut ctx = SignContext::new();
/// ctx.update(b"hello, ");
/// ctx.update(b"world");
/// ```
#[derive(Clone)]
pub struct SignContext {
    message: Sm3Ctx,
}

impl Default for SignContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SignContext {
    /// Starts a new signing context.
    pub fn new() -> Self {
        let mut message = Sm3Ctx::new();
        message.update(&[HASH2_PREFIX]);
        SignContext { message }
    }

    /// Absorbs more message bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.message.update(data);
    }

    /// Finalizes the signature with a caller-supplied RNG.
    pub fn sign_finish_with_rng(
        self, rng: &mut impl CryptoRngCore, sign_key: &SignKey, master_pub: &SignMasterPubKey,
    ) -> Result<Signature> {
        let g = pairing(master_pub.point(), &p1());

        for _ in 0..MAX_RESAMPLE_ITERATIONS {
            let mut r = FnElem::random(rng)?;
            let w = g.pow(&r.to_bytes());
            let h = hash_to_scalar_from_ctx(&self.message, &w.to_bytes());
            let l = r.sub(&h);
            r.zeroize();
            if l.is_zero() {
                continue;
            }
            let s = sign_key.point().mul(&l);
            return Ok(Signature::new(h.to_bytes(), s.to_uncompressed_octets()));
        }
        Err(Sm9Error::ResampleExhausted)
    }

    /// Finalizes the signature using the system RNG.
    #[cfg(feature = "default-rng")]
    pub fn sign_finish(self, sign_key: &SignKey, master_pub: &SignMasterPubKey) -> Result<Signature> {
        self.sign_finish_with_rng(&mut rand_core::OsRng, sign_key, master_pub)
    }
}

/// Accumulates a message to be verified against a [`Signature`].
#[derive(Clone)]
pub struct VerifyContext {
    message: Sm3Ctx,
}

impl Default for VerifyContext {
    fn default() -> Self {
        Self::new()
    }
}

impl VerifyContext {
    /// Starts a new verification context.
    pub fn new() -> Self {
        let mut message = Sm3Ctx::new();
        message.update(&[HASH2_PREFIX]);
        VerifyContext { message }
    }

    /// Absorbs more message bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.message.update(data);
    }

    /// Checks `signature` against the message absorbed so far, for signer
    /// `id` under the given master public key.
    pub fn verify_finish(
        self, signature: &Signature, master_pub: &SignMasterPubKey, id: &[u8],
    ) -> Result<()> {
        let h = FnElem::from_bytes(&signature.h).map_err(|_| Sm9Error::VerifyFail)?;
        let s = crate::primitives::G1Point::from_uncompressed_octets(&signature.s)?;

        let g = pairing(master_pub.point(), &p1());
        let t = g.pow(&h.to_bytes());

        let mut z = id.to_vec();
        z.push(HID_SIGN);
        let h1 = hash_to_scalar(&z);
        let p = crate::primitives::p2().mul(&h1).add(master_pub.point());

        let u = pairing(&p, &s);
        let w_prime = u.mul(&t);

        let h2 = hash_to_scalar_from_ctx(&self.message, &w_prime.to_bytes());
        if h2 == h {
            Ok(())
        } else {
            Err(Sm9Error::VerifyFail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::fixtures::sign_keypair;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(seed: u64, id: &[u8]) -> (SignMasterPubKey, SignKey, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let master_secret = FnElem::random(&mut rng).unwrap();
        let (master_pub, sign_key) = sign_keypair(&master_secret, id);
        (master_pub, sign_key, rng)
    }

    #[test]
    fn sign_verify_round_trip() {
        let (master_pub, sign_key, mut rng) = setup(30, b"Alice");

        let mut sign_ctx = SignContext::new();
        sign_ctx.update(b"Chinese IBS standard");
        let signature = sign_ctx.sign_finish_with_rng(&mut rng, &sign_key, &master_pub).unwrap();

        let mut verify_ctx = VerifyContext::new();
        verify_ctx.update(b"Chinese IBS standard");
        verify_ctx.verify_finish(&signature, &master_pub, b"Alice").unwrap();
    }

    #[test]
    fn tampered_message_is_rejected() {
        let (master_pub, sign_key, mut rng) = setup(31, b"Alice");

        let mut sign_ctx = SignContext::new();
        sign_ctx.update(b"Chinese IBS standard");
        let signature = sign_ctx.sign_finish_with_rng(&mut rng, &sign_key, &master_pub).unwrap();

        let mut verify_ctx = VerifyContext::new();
        verify_ctx.update(b"a different message");
        let err = verify_ctx.verify_finish(&signature, &master_pub, b"Alice").unwrap_err();
        assert_eq!(err, Sm9Error::VerifyFail);
    }

    #[test]
    fn wrong_identity_is_rejected() {
        let (master_pub, sign_key, mut rng) = setup(32, b"Alice");

        let mut sign_ctx = SignContext::new();
        sign_ctx.update(b"Chinese IBS standard");
        let signature = sign_ctx.sign_finish_with_rng(&mut rng, &sign_key, &master_pub).unwrap();

        let mut verify_ctx = VerifyContext::new();
        verify_ctx.update(b"Chinese IBS standard");
        let err = verify_ctx.verify_finish(&signature, &master_pub, b"Mallory").unwrap_err();
        assert_eq!(err, Sm9Error::VerifyFail);
    }

    #[test]
    fn tampered_s_component_is_rejected() {
        let (master_pub, sign_key, mut rng) = setup(33, b"Alice");

        let mut sign_ctx = SignContext::new();
        sign_ctx.update(b"Chinese IBS standard");
        let mut signature =
            sign_ctx.sign_finish_with_rng(&mut rng, &sign_key, &master_pub).unwrap();
        signature.s[1] ^= 1;

        let mut verify_ctx = VerifyContext::new();
        verify_ctx.update(b"Chinese IBS standard");
        assert!(verify_ctx.verify_finish(&signature, &master_pub, b"Alice").is_err());
    }
}
