//! The SM9 key-exchange protocol (GM/T 0044 §6.4): a four-step
//! authenticated key agreement between an initiator `A` and a responder
//! `B`, built from the same pairing/KDF triad as [`crate::sign`] and
//! [`crate::kem`].
//!
//! [`Initiator`] and [`Responder`] model the two roles as small state
//! machines: each holds exactly the secret an in-flight step needs (the
//! ephemeral scalar `rA`/`rB`, or the derived `(g1, g2, g3)` pairing
//! triple) and nothing more, so the caller's wire protocol only has to
//! shuttle the byte blobs these types hand back between the two steps.

use core::fmt;

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::error::{Result, Sm9Error};
use crate::hash::{hash_to_scalar, kdf, sm3};
use crate::keys::{ExchKey, ExchMasterPubKey};
use crate::primitives::{p1, p2, pairing, FnElem, Fp12Elem, G1Point};

/// Domain separator for the key-exchange scheme's `H1` call.
pub const HID_EXCH: u8 = 0x02;

const MAX_RESAMPLE_ITERATIONS: usize = 256;

/// The agreed session key. Zeroized on drop; equality is constant-time via
/// the same [`subtle::ConstantTimeEq`] discipline as [`crate::kem::SharedSecret`].
#[derive(Clone, zeroize::ZeroizeOnDrop)]
pub struct SessionKey(Vec<u8>);

impl SessionKey {
    /// Returns the raw session key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

impl subtle::ConstantTimeEq for SessionKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        if self.0.len() != other.0.len() {
            return subtle::Choice::from(0);
        }
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for SessionKey {
    fn eq(&self, other: &Self) -> bool {
        bool::from(subtle::ConstantTimeEq::ct_eq(self, other))
    }
}
impl Eq for SessionKey {}

fn peer_point(id: &[u8], master_pub: &ExchMasterPubKey) -> G1Point {
    let mut z = id.to_vec();
    z.push(HID_EXCH);
    let h1 = hash_to_scalar(&z);
    p1().mul(&h1).add(master_pub.point())
}

/// Assembles the KDF/confirmation preimage: identities, then each point's
/// 64-byte `X||Y` (the `0x04` tag stripped), then the three `Fp12`
/// pairing values in the fixed `g1, g2, g3` order.
fn kdf_input(
    id_a: &[u8], id_b: &[u8], ra_xy: &[u8; 64], rb_xy: &[u8; 64], g1: &Fp12Elem, g2: &Fp12Elem,
    g3: &Fp12Elem,
) -> Vec<u8> {
    let mut z = Vec::with_capacity(id_a.len() + id_b.len() + 64 + 64 + 384 * 3);
    z.extend_from_slice(id_a);
    z.extend_from_slice(id_b);
    z.extend_from_slice(ra_xy);
    z.extend_from_slice(rb_xy);
    z.extend_from_slice(&g1.to_bytes());
    z.extend_from_slice(&g2.to_bytes());
    z.extend_from_slice(&g3.to_bytes());
    z
}

/// `SM3(prefix || g1 || SM3(g2 || g3 || IDA || IDB || RA_xy || RB_xy))`,
/// the shape shared by both confirmation tags `SB` and `SA`.
fn confirmation_tag(
    prefix: u8, id_a: &[u8], id_b: &[u8], ra_xy: &[u8; 64], rb_xy: &[u8; 64], g1: &Fp12Elem,
    g2: &Fp12Elem, g3: &Fp12Elem,
) -> [u8; 32] {
    let inner = sm3(&[&g2.to_bytes(), &g3.to_bytes(), id_a, id_b, ra_xy, rb_xy]);
    sm3(&[&[prefix], &g1.to_bytes(), &inner])
}

fn strip_tag(uncompressed: &[u8; 65]) -> [u8; 64] {
    let mut xy = [0u8; 64];
    xy.copy_from_slice(&uncompressed[1..]);
    xy
}

/// The initiator side of the exchange, holding the ephemeral secret `rA`
/// between [`Initiator::start_with_rng`] and [`Initiator::finish`].
#[derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct Initiator {
    id_self: Vec<u8>,
    id_peer: Vec<u8>,
    r: FnElem,
    ra_point: G1Point,
}

impl Initiator {
    /// Step 1A: computes `QB`, draws `rA`, and returns `RA = [rA] QB` to
    /// send to the responder.
    pub fn start_with_rng(
        rng: &mut impl CryptoRngCore, id_self: &[u8], id_peer: &[u8], master_pub: &ExchMasterPubKey,
    ) -> Result<(Self, [u8; 65])> {
        let q_peer = peer_point(id_peer, master_pub);
        let r = FnElem::random(rng)?;
        let ra_point = q_peer.mul(&r);
        let ra_bytes = ra_point.to_uncompressed_octets();
        let state = Initiator { id_self: id_self.to_vec(), id_peer: id_peer.to_vec(), r, ra_point };
        Ok((state, ra_bytes))
    }

    /// Step 1A using the system RNG.
    #[cfg(feature = "default-rng")]
    pub fn start(
        id_self: &[u8], id_peer: &[u8], master_pub: &ExchMasterPubKey,
    ) -> Result<(Self, [u8; 65])> {
        Self::start_with_rng(&mut rand_core::OsRng, id_self, id_peer, master_pub)
    }

    /// Step 2A: verifies `RB` is on-curve, derives the session key, and
    /// returns it along with the confirmation tag `SA` to send to `B`.
    ///
    /// If `peer_tag` is `Some(SB)`, it is checked against the locally
    /// recomputed confirmation before the session key is returned.
    pub fn finish(
        mut self, exch_key: &ExchKey, master_pub: &ExchMasterPubKey, rb_bytes: &[u8], klen: usize,
        peer_tag: Option<&[u8; 32]>,
    ) -> Result<(SessionKey, [u8; 32])> {
        let rb_point = G1Point::from_uncompressed_octets(rb_bytes)?;

        let g1 = pairing(&p2(), master_pub.point()).pow(&self.r.to_bytes());
        let g2 = pairing(exch_key.point(), &rb_point);
        let g3 = g2.pow(&self.r.to_bytes());
        self.r.zeroize();

        let ra_xy = strip_tag(&self.ra_point.to_uncompressed_octets());
        let rb_xy = strip_tag(&rb_bytes.try_into().map_err(|_| Sm9Error::WrongLength)?);

        if let Some(sb) = peer_tag {
            let expected =
                confirmation_tag(0x82, &self.id_self, &self.id_peer, &ra_xy, &rb_xy, &g1, &g2, &g3);
            if &expected != sb {
                return Err(Sm9Error::VerifyFail);
            }
        }

        let z = kdf_input(&self.id_self, &self.id_peer, &ra_xy, &rb_xy, &g1, &g2, &g3);
        let sk = kdf(&z, klen);
        if sk.iter().all(|&b| b == 0) {
            return Err(Sm9Error::KeyZero);
        }

        let sa = confirmation_tag(0x83, &self.id_self, &self.id_peer, &ra_xy, &rb_xy, &g1, &g2, &g3);
        Ok((SessionKey(sk), sa))
    }
}

/// The responder side of the exchange. Unlike [`Initiator`], the
/// responder's ephemeral scalar never outlives [`Responder::respond_with_rng`]
/// — only the derived pairing triple needs to survive to
/// [`Responder::confirm`].
#[derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct Responder {
    id_a: Vec<u8>,
    id_b: Vec<u8>,
    ra_xy: [u8; 64],
    rb_xy: [u8; 64],
    g1: Fp12Elem,
    g2: Fp12Elem,
    g3: Fp12Elem,
}

impl Responder {
    /// Step 1B: verifies `RA` is on-curve, then loops drawing `rB` until a
    /// nonzero session key is derived. Returns the responder state (needed
    /// for [`Responder::confirm`]), the session key, `RB` to send to `A`,
    /// and the optional confirmation tag `SB`.
    pub fn respond_with_rng(
        rng: &mut impl CryptoRngCore, id_a: &[u8], id_b: &[u8], exch_key: &ExchKey,
        master_pub: &ExchMasterPubKey, ra_bytes: &[u8], klen: usize,
    ) -> Result<(Self, SessionKey, [u8; 65], [u8; 32])> {
        let ra_point = G1Point::from_uncompressed_octets(ra_bytes)?;
        let q_a = peer_point(id_a, master_pub);
        let ra_xy = strip_tag(&ra_point.to_uncompressed_octets());

        for _ in 0..MAX_RESAMPLE_ITERATIONS {
            let mut r = FnElem::random(rng)?;
            let rb_point = q_a.mul(&r);

            let g1 = pairing(exch_key.point(), &ra_point);
            let g2 = pairing(&p2(), master_pub.point()).pow(&r.to_bytes());
            let g3 = g1.pow(&r.to_bytes());
            r.zeroize();

            let rb_xy = strip_tag(&rb_point.to_uncompressed_octets());
            let z = kdf_input(id_a, id_b, &ra_xy, &rb_xy, &g1, &g2, &g3);
            let sk = kdf(&z, klen);
            if sk.iter().all(|&b| b == 0) {
                continue;
            }

            let sb = confirmation_tag(0x82, id_a, id_b, &ra_xy, &rb_xy, &g1, &g2, &g3);
            let state = Responder {
                id_a: id_a.to_vec(),
                id_b: id_b.to_vec(),
                ra_xy,
                rb_xy,
                g1,
                g2,
                g3,
            };
            return Ok((state, SessionKey(sk), rb_point.to_uncompressed_octets(), sb));
        }
        Err(Sm9Error::ResampleExhausted)
    }

    /// Step 1B using the system RNG.
    #[cfg(feature = "default-rng")]
    pub fn respond(
        id_a: &[u8], id_b: &[u8], exch_key: &ExchKey, master_pub: &ExchMasterPubKey,
        ra_bytes: &[u8], klen: usize,
    ) -> Result<(Self, SessionKey, [u8; 65], [u8; 32])> {
        Self::respond_with_rng(&mut rand_core::OsRng, id_a, id_b, exch_key, master_pub, ra_bytes, klen)
    }

    /// Step 2B: checks `A`'s final confirmation tag `SA` against the
    /// locally recomputed one.
    pub fn confirm(&self, sa: &[u8; 32]) -> Result<()> {
        let expected = confirmation_tag(
            0x83, &self.id_a, &self.id_b, &self.ra_xy, &self.rb_xy, &self.g1, &self.g2, &self.g3,
        );
        if &expected == sa {
            Ok(())
        } else {
            Err(Sm9Error::VerifyFail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::fixtures::exch_keypair;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn both_sides_agree() {
        let mut rng = ChaCha8Rng::seed_from_u64(20);
        let master_secret = FnElem::random(&mut rng).unwrap();
        let (master_pub, key_a) = exch_keypair(&master_secret, b"Alice", HID_EXCH);
        let (_, key_b) = exch_keypair(&master_secret, b"Bob", HID_EXCH);

        let (initiator, ra_bytes) =
            Initiator::start_with_rng(&mut rng, b"Alice", b"Bob", &master_pub).unwrap();

        let (responder, sk_b, rb_bytes, sb) = Responder::respond_with_rng(
            &mut rng, b"Alice", b"Bob", &key_b, &master_pub, &ra_bytes, 16,
        )
        .unwrap();

        let (sk_a, sa) =
            initiator.finish(&key_a, &master_pub, &rb_bytes, 16, Some(&sb)).unwrap();

        assert_eq!(sk_a, sk_b);
        assert_eq!(sk_a.as_bytes().len(), 16);
        responder.confirm(&sa).unwrap();
    }

    #[test]
    fn tampered_confirmation_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let master_secret = FnElem::random(&mut rng).unwrap();
        let (master_pub, key_a) = exch_keypair(&master_secret, b"Alice", HID_EXCH);
        let (_, key_b) = exch_keypair(&master_secret, b"Bob", HID_EXCH);

        let (initiator, ra_bytes) =
            Initiator::start_with_rng(&mut rng, b"Alice", b"Bob", &master_pub).unwrap();
        let (responder, _sk_b, rb_bytes, mut sb) = Responder::respond_with_rng(
            &mut rng, b"Alice", b"Bob", &key_b, &master_pub, &ra_bytes, 16,
        )
        .unwrap();
        sb[0] ^= 1;

        let err = initiator.finish(&key_a, &master_pub, &rb_bytes, 16, Some(&sb)).unwrap_err();
        assert_eq!(err, Sm9Error::VerifyFail);

        let mut bad_sa = [0u8; 32];
        bad_sa[0] = 0xff;
        let err = responder.confirm(&bad_sa).unwrap_err();
        assert_eq!(err, Sm9Error::VerifyFail);
    }
}
