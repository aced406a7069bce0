//! `SM9Cipher ::= SEQUENCE { EnType INTEGER, C1 BIT STRING, C3 OCTET
//! STRING, CipherText OCTET STRING }` wire codec.
//!
//! `CipherText` is the only variable-length field; like every other field
//! here it is written as a strictly-tagged `OCTET STRING` with an explicit
//! length prefix, not a raw trailing blob.

use super::der::{write_bit_string, write_octet_string, write_sequence, write_small_integer, DerReader};
use crate::error::{Result, Sm9Error};

/// The only `EnType` this crate's envelope supports: XOR-stream keystream
/// encryption with an HMAC-SM3 tag.
pub(crate) const EN_TYPE_XOR: u8 = 0;

/// A decoded ciphertext: `C1` (a 65-byte uncompressed G1 point), `C3` (a
/// 32-byte HMAC-SM3 tag), and `C2` (the variable-length XOR keystream
/// output).
pub struct Ciphertext {
    pub(crate) c1: [u8; 65],
    pub(crate) c3: [u8; 32],
    pub(crate) c2: Vec<u8>,
}

impl Ciphertext {
    pub(crate) fn new(c1: [u8; 65], c3: [u8; 32], c2: Vec<u8>) -> Self {
        Ciphertext { c1, c3, c2 }
    }

    /// Encodes this ciphertext as a DER `SEQUENCE`.
    pub fn to_der(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_sequence(&mut out, |sink| {
            write_small_integer(sink, EN_TYPE_XOR);
            write_bit_string(sink, &self.c1);
            write_octet_string(sink, &self.c3);
            write_octet_string(sink, &self.c2);
        });
        out
    }

    /// Decodes a ciphertext from its DER `SEQUENCE` encoding. Fails with
    /// [`Sm9Error::WrongEncType`] if `EnType` is not the XOR-stream scheme
    /// this crate supports.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let mut outer = DerReader::new(bytes);
        let mut seq = outer.read_sequence()?;
        let en_type = seq.read_small_integer()?;
        if en_type != EN_TYPE_XOR {
            return Err(Sm9Error::WrongEncType);
        }
        let c1 = seq.read_bit_string()?;
        let c3 = seq.read_octet_string()?;
        let c2 = seq.read_octet_string()?;
        seq.finish()?;
        outer.finish()?;
        let c1: [u8; 65] = c1.try_into().map_err(|_| Sm9Error::WrongLength)?;
        let c3: [u8; 32] = c3.try_into().map_err(|_| Sm9Error::WrongLength)?;
        Ok(Ciphertext { c1, c3, c2: c2.to_vec() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ciphertext {
        let mut c1 = [0u8; 65];
        c1[0] = 0x04;
        c1[1..].fill(0x33);
        Ciphertext::new(c1, [0x44u8; 32], vec![1, 2, 3, 4, 5])
    }

    #[test]
    fn round_trips_through_der() {
        let ct = sample();
        let der = ct.to_der();
        let decoded = Ciphertext::from_der(&der).unwrap();
        assert_eq!(decoded.c1, ct.c1);
        assert_eq!(decoded.c3, ct.c3);
        assert_eq!(decoded.c2, ct.c2);
    }

    #[test]
    fn round_trips_with_empty_cipher_payload() {
        let ct = Ciphertext::new([0x04u8; 65], [0u8; 32], Vec::new());
        let der = ct.to_der();
        let decoded = Ciphertext::from_der(&der).unwrap();
        assert!(decoded.c2.is_empty());
    }

    #[test]
    fn rejects_unknown_en_type() {
        let mut der = sample().to_der();
        // EnType is the SEQUENCE's first element: tag, length, value at
        // offset 2.
        assert_eq!(der[2], EN_TYPE_XOR);
        der[2] = 1;
        let err = Ciphertext::from_der(&der).unwrap_err();
        assert_eq!(err, Sm9Error::WrongEncType);
    }

    #[test]
    fn rejects_trailing_data() {
        let mut der = sample().to_der();
        der.push(0);
        let err = Ciphertext::from_der(&der).unwrap_err();
        assert_eq!(err, Sm9Error::TrailingData);
    }
}
