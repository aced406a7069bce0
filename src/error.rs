//! The error taxonomy shared by every protocol-layer operation.

use thiserror::Error;

/// Errors surfaced by the SM9 protocol layer.
///
/// Decode errors, range errors, and `VerifyFail` are kept as distinct
/// variants on purpose: a caller needs to tell "this blob is not a
/// well-formed signature" apart from "this is a well-formed signature that
/// does not verify."
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sm9Error {
    /// Malformed DER: bad tag, bad length, or trailing bytes after the
    /// top-level SEQUENCE.
    #[error("malformed DER encoding")]
    Malformed,

    /// A DER field decoded to the wrong fixed length for its type.
    #[error("field has the wrong wire length")]
    WrongLength,

    /// The ciphertext codec's `EnType` was not the supported XOR-stream
    /// value (0).
    #[error("unsupported or unknown EnType")]
    WrongEncType,

    /// Bytes left over after the top-level DER SEQUENCE was consumed.
    #[error("trailing data after DER value")]
    TrailingData,

    /// A decoded or peer-supplied point failed the on-curve / subgroup
    /// check.
    #[error("point is not on the curve")]
    InvalidPoint,

    /// A scalar fell outside `[1, N-1]`.
    #[error("scalar out of range")]
    RangeError,

    /// HMAC-SM3 tag comparison failed during decryption.
    #[error("ciphertext authentication failed")]
    MacMismatch,

    /// A signature or key-exchange confirmation tag did not match. This is
    /// a cryptographic negative, not a decode error.
    #[error("signature or confirmation verification failed")]
    VerifyFail,

    /// A derived `K`/`SK` was all-zero after KDF expansion.
    #[error("derived key material was all zero")]
    KeyZero,

    /// The configured random source failed to produce bytes.
    #[error("secure random source unavailable")]
    EntropyFailure,

    /// Plaintext exceeded `MAX_PLAINTEXT_SIZE`.
    #[error("plaintext exceeds the maximum supported size")]
    SizeExceeded,

    /// A rejection-resample loop exceeded its iteration bound without
    /// succeeding; this should not happen with a working RNG and indicates
    /// a pathological or broken primitive layer.
    #[error("rejection-resample loop exceeded its safety bound")]
    ResampleExhausted,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Sm9Error>;
