//! `Fn`, the scalar field of order `N` used by signatures, KEM randomizers,
//! and key-exchange ephemeral values.

use core::fmt;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use super::limbs::{self, Limb4};
use crate::error::{Result, Sm9Error};

/// The order of the cyclic groups G1, G2, and GT.
///
/// This is the standard SM9 curve order (GM/T 0044 Appendix D); the
/// primitive layer is the one part of this crate not exercised by the
/// standard's Appendix test vectors (see the crate-level docs).
#[rustfmt::skip]
pub const N_BYTES: [u8; 32] = [
    0xB6, 0x40, 0x00, 0x00, 0x02, 0xA3, 0xA6, 0xF1,
    0xD6, 0x03, 0xAB, 0x4F, 0xF5, 0x8E, 0xC7, 0x44,
    0x49, 0xF2, 0x93, 0x4B, 0x18, 0xEA, 0x8B, 0xEE,
    0xE5, 0x6E, 0xE1, 0x9C, 0xD6, 0x9E, 0xCF, 0x25,
];

pub(crate) fn modulus() -> Limb4 {
    limbs::from_be_bytes(&N_BYTES)
}

/// An element of `Fn`, the scalar field of order `N`.
///
/// Always kept reduced modulo `N`. Zeroized on drop since every scalar this
/// crate handles (`r`, `rA`, `rB`, private signing/decryption keys) is
/// secret.
#[derive(Clone, Copy)]
pub struct FnElem(pub(crate) Limb4);

impl fmt::Debug for FnElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnElem(..)")
    }
}

impl Zeroize for FnElem {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ConstantTimeEq for FnElem {
    fn ct_eq(&self, other: &Self) -> Choice {
        let a = limbs::to_be_bytes(&self.0);
        let b = limbs::to_be_bytes(&other.0);
        a.ct_eq(&b)
    }
}

impl PartialEq for FnElem {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl Eq for FnElem {}

impl FnElem {
    /// The additive identity.
    pub fn zero() -> Self {
        FnElem(limbs::ZERO)
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        FnElem(limbs::one())
    }

    pub(crate) fn is_zero(&self) -> bool {
        limbs::is_zero(&self.0)
    }

    /// Draws a uniform element of `[1, N-1]` from `rng`.
    ///
    /// Rejection-sampled against oversized draws to avoid modulo bias, and
    /// rejects zero since every caller in this crate (signing, KEM, key
    /// exchange) requires a nonzero randomizer.
    pub fn random(rng: &mut impl CryptoRngCore) -> Result<Self> {
        let m = modulus();
        for _ in 0..256 {
            let mut buf = [0u8; 32];
            rng.try_fill_bytes(&mut buf)
                .map_err(|_| Sm9Error::EntropyFailure)?;
            let candidate = limbs::from_be_bytes(&buf);
            if limbs::cmp(&candidate, &m) == core::cmp::Ordering::Less && !limbs::is_zero(&candidate) {
                return Ok(FnElem(candidate));
            }
        }
        Err(Sm9Error::ResampleExhausted)
    }

    /// Reduces an oversized hash digest into `Fn` the way GM/T 0044's `Hv`
    /// construction does: `wide`, read as a big-endian integer, is reduced
    /// modulo `N - 1` and then incremented by one, landing in `[1, N-1]`
    /// and never producing zero.
    pub(crate) fn from_wide_bytes(wide: &[u8]) -> Self {
        let n_minus_one = modulus().wrapping_sub(&limbs::one());
        let reduced = limbs::reduce_wide_bytes(wide, &n_minus_one);
        FnElem(limbs::add_mod(&reduced, &limbs::one(), &modulus()))
    }

    /// Parses a big-endian 32-byte encoding, rejecting values outside
    /// `[1, N-1]`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let v = limbs::from_be_bytes(bytes);
        let m = modulus();
        if limbs::is_zero(&v) || limbs::cmp(&v, &m) != core::cmp::Ordering::Less {
            return Err(Sm9Error::RangeError);
        }
        Ok(FnElem(v))
    }

    /// Big-endian 32-byte encoding.
    pub fn to_bytes(self) -> [u8; 32] {
        limbs::to_be_bytes(&self.0)
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        FnElem(limbs::add_mod(&self.0, &other.0, &modulus()))
    }

    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        FnElem(limbs::sub_mod(&self.0, &other.0, &modulus()))
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        FnElem(limbs::neg_mod(&self.0, &modulus()))
    }

    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        FnElem(limbs::mul_mod(&self.0, &other.0, &modulus()))
    }

    /// Multiplicative inverse. Callers must ensure `self` is nonzero; `N`
    /// is prime so every nonzero element has one.
    #[must_use]
    pub fn inv(&self) -> Self {
        FnElem(limbs::inv_mod_prime(&self.0, &modulus()))
    }
}
