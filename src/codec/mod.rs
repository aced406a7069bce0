//! ASN.1 DER wire encodings for the two structures this crate ships over
//! the wire: signatures and ciphertexts.

mod ciphertext;
mod der;
mod signature;

pub use ciphertext::Ciphertext;
pub use signature::Signature;
