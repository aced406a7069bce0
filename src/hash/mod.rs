//! SM3-backed hashing: the streaming context used by sign/verify, the
//! `H1`/`H2` hash-to-scalar functions, the counter-mode KDF, and HMAC-SM3.
//!
//! SM3 itself is out of this crate's scope — it is imported from the `sm3`
//! crate rather than reimplemented.

use digest::Digest;
use zeroize::Zeroize;

use crate::primitives::FnElem;

/// A streaming SM3 context that can be snapshotted mid-message.
///
/// Signing and verifying both absorb the message once and then need to
/// finalize it twice with different trailing counter bytes (the `H1`
/// rejection-resample loop during signing, and the `h'`/confirmation
/// recomputation during verification); cloning the underlying hasher state
/// lets both branches reuse the already-absorbed message instead of
/// re-hashing it.
#[derive(Clone)]
pub(crate) struct Sm3Ctx(sm3::Sm3);

impl Sm3Ctx {
    pub(crate) fn new() -> Self {
        Sm3Ctx(sm3::Sm3::new())
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    /// Finalizes a clone of the current state, leaving `self` untouched so
    /// the caller can finalize again with different trailing bytes.
    pub(crate) fn clone_finalize(&self, trailing: &[u8]) -> [u8; 32] {
        let mut clone = self.0.clone();
        Digest::update(&mut clone, trailing);
        clone.finalize().into()
    }

    pub(crate) fn finalize(self) -> [u8; 32] {
        self.0.finalize().into()
    }
}

impl Zeroize for Sm3Ctx {
    fn zeroize(&mut self) {
        *self = Sm3Ctx::new();
    }
}

/// One-shot SM3 over a sequence of byte slices, avoiding a prior
/// concatenation allocation.
pub(crate) fn sm3(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = sm3::Sm3::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    hasher.finalize().into()
}

/// The fixed one-byte function index `H1` prefixes every absorb with, per
/// GM/T 0044 — distinct from the variable `hid` domain separator `z`
/// itself carries (signing vs. encryption vs. exchange).
const HASH1_PREFIX: u8 = 0x01;

/// `H2`'s counterpart fixed prefix. Also used by [`crate::sign`] to seed a
/// fresh [`Sm3Ctx`] before any message bytes are absorbed, so the prefix
/// ends up first in the stream without the caller having to know about it.
pub(crate) const HASH2_PREFIX: u8 = 0x02;

/// `H1` from GM/T 0044: hashes `(0x01 || z)` twice with 4-byte big-endian
/// counters `1` and `2` appended, concatenates the two 32-byte digests
/// into a 512-bit value, and reduces that value into `Fn`.
pub(crate) fn hash_to_scalar(z: &[u8]) -> FnElem {
    let ha1 = sm3(&[&[HASH1_PREFIX], z, &[0, 0, 0, 1]]);
    let ha2 = sm3(&[&[HASH1_PREFIX], z, &[0, 0, 0, 2]]);
    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(&ha1);
    wide[32..].copy_from_slice(&ha2);
    FnElem::from_wide_bytes(&wide)
}

/// `H2` against an already-streamed message context: finalizes two clones
/// of `ctx` with `w` and a counter suffix appended, the same two-digest
/// construction as [`hash_to_scalar`], without re-hashing the message
/// that's already been absorbed into `ctx`.
pub(crate) fn hash_to_scalar_from_ctx(ctx: &Sm3Ctx, w: &[u8]) -> FnElem {
    let mut trailing1 = Vec::with_capacity(w.len() + 4);
    trailing1.extend_from_slice(w);
    trailing1.extend_from_slice(&[0, 0, 0, 1]);
    let mut trailing2 = Vec::with_capacity(w.len() + 4);
    trailing2.extend_from_slice(w);
    trailing2.extend_from_slice(&[0, 0, 0, 2]);

    let ha1 = ctx.clone_finalize(&trailing1);
    let ha2 = ctx.clone_finalize(&trailing2);
    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(&ha1);
    wide[32..].copy_from_slice(&ha2);
    FnElem::from_wide_bytes(&wide)
}

/// Counter-mode KDF: `SM3(Z || ct)` for `ct = 1, 2, ...`, truncated to
/// `out_len` bytes.
pub(crate) fn kdf(z: &[u8], out_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(out_len);
    let mut counter: u32 = 1;
    while out.len() < out_len {
        let digest = sm3(&[z, &counter.to_be_bytes()]);
        let take = (out_len - out.len()).min(digest.len());
        out.extend_from_slice(&digest[..take]);
        counter += 1;
    }
    out
}

const SM3_BLOCK_LEN: usize = 64;

/// HMAC-SM3 per RFC 2104, instantiated with SM3's 64-byte block size.
pub(crate) fn hmac_sm3(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut block_key = [0u8; SM3_BLOCK_LEN];
    if key.len() > SM3_BLOCK_LEN {
        let digest = sm3(&[key]);
        block_key[..digest.len()].copy_from_slice(&digest);
    } else {
        block_key[..key.len()].copy_from_slice(key);
    }

    let mut ipad = [0x36u8; SM3_BLOCK_LEN];
    let mut opad = [0x5cu8; SM3_BLOCK_LEN];
    for i in 0..SM3_BLOCK_LEN {
        ipad[i] ^= block_key[i];
        opad[i] ^= block_key[i];
    }

    let inner = sm3(&[&ipad, data]);
    let result = sm3(&[&opad, &inner]);
    block_key.zeroize();
    result
}
