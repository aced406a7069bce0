//! Minimal DER primitives for the two `SEQUENCE`s this crate encodes:
//! `Signature` and `SM9Cipher`. Not a general ASN.1 library — just enough
//! tag/length/value handling for fixed-shape sequences of `INTEGER`,
//! `OCTET STRING`, and `BIT STRING`.

use crate::error::{Result, Sm9Error};

const TAG_INTEGER: u8 = 0x02;
const TAG_BIT_STRING: u8 = 0x03;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_SEQUENCE: u8 = 0x30;

/// A sink that either counts bytes (the measuring pass) or writes them
/// (the encoding pass), so every `write_*` helper below is run twice
/// against the same logic instead of duplicating it.
pub(crate) trait DerSink {
    fn put(&mut self, bytes: &[u8]);
}

pub(crate) struct LengthCounter(pub(crate) usize);

impl DerSink for LengthCounter {
    fn put(&mut self, bytes: &[u8]) {
        self.0 += bytes.len();
    }
}

impl DerSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

fn write_length(sink: &mut dyn DerSink, len: usize) {
    if len < 0x80 {
        sink.put(&[len as u8]);
    } else {
        let be = (len as u64).to_be_bytes();
        let first_nonzero = be.iter().position(|&b| b != 0).unwrap_or(7);
        let significant = &be[first_nonzero..];
        sink.put(&[0x80 | significant.len() as u8]);
        sink.put(significant);
    }
}

pub(crate) fn write_tlv(sink: &mut dyn DerSink, tag: u8, content: &[u8]) {
    sink.put(&[tag]);
    write_length(sink, content.len());
    sink.put(content);
}

pub(crate) fn write_sequence(sink: &mut dyn DerSink, write_content: impl Fn(&mut dyn DerSink)) {
    let mut counter = LengthCounter(0);
    write_content(&mut counter);
    sink.put(&[TAG_SEQUENCE]);
    write_length(sink, counter.0);
    write_content(sink);
}

pub(crate) fn write_octet_string(sink: &mut dyn DerSink, bytes: &[u8]) {
    write_tlv(sink, TAG_OCTET_STRING, bytes);
}

/// Writes a `BIT STRING` whose content is always a whole number of bytes
/// (every point octet form this crate encodes is), so the "unused bits"
/// leading byte is always `0`.
pub(crate) fn write_bit_string(sink: &mut dyn DerSink, bytes: &[u8]) {
    let mut content = Vec::with_capacity(bytes.len() + 1);
    content.push(0);
    content.extend_from_slice(bytes);
    write_tlv(sink, TAG_BIT_STRING, &content);
}

/// Writes a small non-negative `INTEGER` (this crate only ever encodes the
/// single-byte `EnType` tag this way).
pub(crate) fn write_small_integer(sink: &mut dyn DerSink, value: u8) {
    write_tlv(sink, TAG_INTEGER, &[value]);
}

/// A read cursor over a DER-encoded byte slice.
pub(crate) struct DerReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        DerReader { bytes, pos: 0 }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let b = *self.bytes.get(self.pos).ok_or(Sm9Error::Malformed)?;
        self.pos += 1;
        Ok(b)
    }

    fn read_length(&mut self) -> Result<usize> {
        let first = self.read_u8()?;
        if first & 0x80 == 0 {
            return Ok(first as usize);
        }
        let num_bytes = (first & 0x7f) as usize;
        if num_bytes == 0 || num_bytes > 8 {
            return Err(Sm9Error::Malformed);
        }
        let mut len: u64 = 0;
        for _ in 0..num_bytes {
            len = (len << 8) | u64::from(self.read_u8()?);
        }
        Ok(len as usize)
    }

    fn read_tlv(&mut self, expected_tag: u8) -> Result<&'a [u8]> {
        let tag = self.read_u8()?;
        if tag != expected_tag {
            return Err(Sm9Error::Malformed);
        }
        let len = self.read_length()?;
        let start = self.pos;
        let end = start.checked_add(len).ok_or(Sm9Error::Malformed)?;
        let content = self.bytes.get(start..end).ok_or(Sm9Error::Malformed)?;
        self.pos = end;
        Ok(content)
    }

    /// Enters a `SEQUENCE`, returning a reader scoped to its content.
    pub(crate) fn read_sequence(&mut self) -> Result<DerReader<'a>> {
        let content = self.read_tlv(TAG_SEQUENCE)?;
        Ok(DerReader::new(content))
    }

    pub(crate) fn read_small_integer(&mut self) -> Result<u8> {
        let content = self.read_tlv(TAG_INTEGER)?;
        if content.len() != 1 {
            return Err(Sm9Error::Malformed);
        }
        Ok(content[0])
    }

    pub(crate) fn read_octet_string(&mut self) -> Result<&'a [u8]> {
        self.read_tlv(TAG_OCTET_STRING)
    }

    /// Reads a `BIT STRING` whose content is a whole number of bytes,
    /// dropping the leading "unused bits" byte.
    pub(crate) fn read_bit_string(&mut self) -> Result<&'a [u8]> {
        let content = self.read_tlv(TAG_BIT_STRING)?;
        let (unused, data) = content.split_first().ok_or(Sm9Error::Malformed)?;
        if *unused != 0 {
            return Err(Sm9Error::Malformed);
        }
        Ok(data)
    }

    pub(crate) fn finish(self) -> Result<()> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(Sm9Error::TrailingData)
        }
    }
}
