//! `Signature ::= SEQUENCE { h OCTET STRING, S BIT STRING }` wire codec.

use super::der::{write_bit_string, write_octet_string, write_sequence, DerReader};
use crate::error::{Result, Sm9Error};

/// A decoded signature: `h` (32 bytes) and `S` (a 65-byte uncompressed G1
/// point).
pub struct Signature {
    pub(crate) h: [u8; 32],
    pub(crate) s: [u8; 65],
}

impl Signature {
    pub(crate) fn new(h: [u8; 32], s: [u8; 65]) -> Self {
        Signature { h, s }
    }

    /// Encodes this signature as a DER `SEQUENCE`.
    pub fn to_der(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_sequence(&mut out, |sink| {
            write_octet_string(sink, &self.h);
            write_bit_string(sink, &self.s);
        });
        out
    }

    /// Decodes a signature from its DER `SEQUENCE` encoding.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let mut outer = DerReader::new(bytes);
        let mut seq = outer.read_sequence()?;
        let h = seq.read_octet_string()?;
        let s = seq.read_bit_string()?;
        seq.finish()?;
        outer.finish()?;
        let h: [u8; 32] = h.try_into().map_err(|_| Sm9Error::WrongLength)?;
        let s: [u8; 65] = s.try_into().map_err(|_| Sm9Error::WrongLength)?;
        Ok(Signature { h, s })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_der() {
        let h = [0x11u8; 32];
        let mut s = [0u8; 65];
        s[0] = 0x04;
        s[1..].fill(0x22);
        let sig = Signature::new(h, s);

        let der = sig.to_der();
        let decoded = Signature::from_der(&der).unwrap();
        assert_eq!(decoded.h, h);
        assert_eq!(decoded.s, s);
    }

    #[test]
    fn rejects_trailing_data() {
        let sig = Signature::new([0u8; 32], [0u8; 65]);
        let mut der = sig.to_der();
        der.push(0xff);
        let err = Signature::from_der(&der).unwrap_err();
        assert_eq!(err, Sm9Error::TrailingData);
    }

    #[test]
    fn rejects_truncated_input() {
        let sig = Signature::new([0u8; 32], [0u8; 65]);
        let der = sig.to_der();
        let err = Signature::from_der(&der[..der.len() - 1]).unwrap_err();
        assert_eq!(err, Sm9Error::Malformed);
    }
}
