#![deny(missing_docs, unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]
#![doc = include_str!("../README.md")]

// Implements GM/T 0044-2016 SM9 Identity-Based Cryptographic Algorithms.

// Functionality map per GM/T 0044
//
// 5   Digital signature algorithm       --> sign.rs (SignContext/VerifyContext)
// 6.1 Key encapsulation mechanism       --> kem.rs
// 6.2 Public key encryption (C5)        --> encrypt.rs
// 6.4 Key exchange protocol             --> exchange.rs (Initiator/Responder)
// 6.3/B.1 Key and ciphertext wire forms --> codec/ (DER signatures, ciphertexts)
// Appendix A hash functions (H1/H2/KDF) --> hash/mod.rs
// Appendix curve/pairing arithmetic     --> primitives/ (out of this crate's
//                                           protocol scope; see DESIGN.md)
//
// Master key generation (the Key Generation Center's role) is out of scope;
// see `keys.rs` for the key container types this crate does expose.

pub mod codec;
pub mod encrypt;
pub mod error;
pub mod exchange;
mod hash;
pub mod kem;
pub mod keys;
mod primitives;
pub mod sign;

pub use error::{Result, Sm9Error};
