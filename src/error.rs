//! The codec error taxonomy.
//!
//! Every failure surfaces as exactly one [`CodecError`] variant so callers can
//! distinguish "your input or configuration is wrong" from "this cookie has
//! been tampered with" without string-matching error text. Nothing is logged
//! and swallowed, nothing is retried, and no variant carries a partial result.

use thiserror::Error;

use crate::frame::MAX_ENCODED_LEN;

/// Errors produced by [`encode`](crate::encode) and [`decode`](crate::decode).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The cipher configuration is missing a field, names an unsupported
    /// algorithm, or is incompatible with the chosen algorithm.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The payload handed to `encode` is null, a bare primitive, or not
    /// serialisable as JSON.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The text handed to `decode` is empty.
    #[error("input text is empty")]
    InvalidInput,

    /// The encoded cookie does not have the expected
    /// `base64(hex.hex.hex)` structure.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// Authentication-tag verification failed: the ciphertext or tag was
    /// modified, or the wrong key was supplied.
    #[error("authentication tag verification failed")]
    AuthenticationFailure,

    /// The decrypted bytes are not a valid session payload.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// The underlying cipher operation failed.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),

    /// The encoded cookie exceeds the per-cookie byte ceiling.
    #[error("encoded cookie is {0} bytes, limit is {MAX_ENCODED_LEN}")]
    SizeLimitExceeded(usize),
}
