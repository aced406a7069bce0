//! Key container types.
//!
//! These are thin typed wrappers around primitive-layer points with
//! byte (de)serialization; producing them from a KGC master secret is out
//! of scope for this crate's public API the same way key generation from a
//! root CA key is out of scope for a TLS library that only consumes
//! already-issued certificates — a real deployment calls out to a Key
//! Generation Center for that. `#[cfg(test)]` fixtures below derive keys
//! directly from a master secret scalar purely so the protocol-layer tests
//! have something to sign/verify/encrypt/decrypt against.

use crate::error::Result;
use crate::primitives::{G1Point, G2Point};

/// The signature master public key `Ppub-s = [ks] P2`.
#[derive(Clone, Copy)]
pub struct SignMasterPubKey(pub(crate) G2Point);

impl SignMasterPubKey {
    /// Parses an uncompressed point encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(SignMasterPubKey(G2Point::from_uncompressed_octets(bytes)?))
    }
    /// Encodes the point in uncompressed octet form.
    pub fn to_bytes(&self) -> [u8; 129] {
        self.0.to_uncompressed_octets()
    }
    pub(crate) fn point(&self) -> &G2Point {
        &self.0
    }
}

/// A signer's private key `dsA = [ks / (H1(IDA||hid) + ks)] P1`.
#[derive(Clone, Copy)]
pub struct SignKey(pub(crate) G1Point);

impl SignKey {
    /// Parses an uncompressed point encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(SignKey(G1Point::from_uncompressed_octets(bytes)?))
    }
    /// Encodes the point in uncompressed octet form.
    pub fn to_bytes(&self) -> [u8; 65] {
        self.0.to_uncompressed_octets()
    }
    pub(crate) fn point(&self) -> &G1Point {
        &self.0
    }
}

/// The encryption master public key `Ppub-e = [ke] P1`.
#[derive(Clone, Copy)]
pub struct EncMasterPubKey(pub(crate) G1Point);

impl EncMasterPubKey {
    /// Parses an uncompressed point encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(EncMasterPubKey(G1Point::from_uncompressed_octets(bytes)?))
    }
    /// Encodes the point in uncompressed octet form.
    pub fn to_bytes(&self) -> [u8; 65] {
        self.0.to_uncompressed_octets()
    }
    pub(crate) fn point(&self) -> &G1Point {
        &self.0
    }
}

/// A recipient's private key `deB = [ke / (H1(IDB||hid) + ke)] P2`.
#[derive(Clone, Copy)]
pub struct EncKey(pub(crate) G2Point);

impl EncKey {
    /// Parses an uncompressed point encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(EncKey(G2Point::from_uncompressed_octets(bytes)?))
    }
    /// Encodes the point in uncompressed octet form.
    pub fn to_bytes(&self) -> [u8; 129] {
        self.0.to_uncompressed_octets()
    }
    pub(crate) fn point(&self) -> &G2Point {
        &self.0
    }
}

/// The key-exchange master public key `Ppub-e = [ke] P1`, shared with the
/// encryption scheme's master key per GM/T 0044.
#[derive(Clone, Copy)]
pub struct ExchMasterPubKey(pub(crate) G1Point);

impl ExchMasterPubKey {
    /// Parses an uncompressed point encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(ExchMasterPubKey(G1Point::from_uncompressed_octets(bytes)?))
    }
    /// Encodes the point in uncompressed octet form.
    pub fn to_bytes(&self) -> [u8; 65] {
        self.0.to_uncompressed_octets()
    }
    pub(crate) fn point(&self) -> &G1Point {
        &self.0
    }
}

/// A key-exchange participant's private key, same shape as [`EncKey`].
#[derive(Clone, Copy)]
pub struct ExchKey(pub(crate) G2Point);

impl ExchKey {
    /// Parses an uncompressed point encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(ExchKey(G2Point::from_uncompressed_octets(bytes)?))
    }
    /// Encodes the point in uncompressed octet form.
    pub fn to_bytes(&self) -> [u8; 129] {
        self.0.to_uncompressed_octets()
    }
    pub(crate) fn point(&self) -> &G2Point {
        &self.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::hash::hash_to_scalar;
    use crate::primitives::{p1, p2, FnElem};

    /// Derives a signature master key pair and a signer key for `id` the
    /// way a Key Generation Center would, for test fixtures only.
    pub(crate) fn sign_keypair(master_secret: &FnElem, id: &[u8]) -> (SignMasterPubKey, SignKey) {
        let master_pub = SignMasterPubKey(p2().mul(master_secret));
        let mut z = id.to_vec();
        z.push(0x01); // HID_SIGN
        let t1 = hash_to_scalar(&z).add(master_secret);
        let t2 = master_secret.mul(&t1.inv());
        let key = SignKey(p1().mul(&t2));
        (master_pub, key)
    }

    /// Derives an encryption master key pair and a recipient key for `id`,
    /// for test fixtures only.
    pub(crate) fn enc_keypair(master_secret: &FnElem, id: &[u8], hid: u8) -> (EncMasterPubKey, EncKey) {
        let master_pub = EncMasterPubKey(p1().mul(master_secret));
        let mut z = id.to_vec();
        z.push(hid);
        let t1 = hash_to_scalar(&z).add(master_secret);
        let t2 = master_secret.mul(&t1.inv());
        let key = EncKey(p2().mul(&t2));
        (master_pub, key)
    }

    /// Derives a key-exchange master key pair and a participant key for
    /// `id`, for test fixtures only. Same shape and derivation as
    /// [`enc_keypair`], wrapped in the exchange-specific key types.
    pub(crate) fn exch_keypair(
        master_secret: &FnElem, id: &[u8], hid: u8,
    ) -> (ExchMasterPubKey, ExchKey) {
        let master_pub = ExchMasterPubKey(p1().mul(master_secret));
        let mut z = id.to_vec();
        z.push(hid);
        let t1 = hash_to_scalar(&z).add(master_secret);
        let t2 = master_secret.mul(&t1.inv());
        let key = ExchKey(p2().mul(&t2));
        (master_pub, key)
    }
}
