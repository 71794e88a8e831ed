//! Authenticated-encryption codec for session cookies.
//!
//! [`encode`] seals an arbitrary JSON-serialisable session payload into a
//! single transport-safe string; [`decode`] opens it again, rejecting
//! anything malformed or tampered with before it reaches application logic.
//!
//! # Cookie format
//!
//! ```text
//! base64( hex(iv) "." hex(auth_tag) "." hex(ciphertext) )
//! ```
//!
//! The IV is freshly random per call, so two encodes of the same payload
//! never produce the same string. For authenticated modes (GCM, GCM-SIV,
//! CCM) the tag is verified on decode; for CBC and CTR the tag component is
//! empty. The encoded output is capped at [`MAX_ENCODED_LEN`] bytes, the
//! practical limit for a single cookie.
//!
//! # Example
//!
//! ```
//! use cookie_codec::{decode, encode, CipherConfig};
//! use serde_json::json;
//!
//! let config = CipherConfig::new("aes-256-gcm", 12, "0123456789abcdef0123456789abcdef");
//! let cookie = encode(&json!({"user": "alice"}), &config)?;
//! let payload: serde_json::Value = decode(&cookie, &config)?;
//! assert_eq!(payload["user"], "alice");
//! # Ok::<(), cookie_codec::CodecError>(())
//! ```
//!
//! The codec is stateless: every call is independent, holds no caches or
//! shared cipher contexts, and may run concurrently from any number of
//! threads. Key storage and rotation belong to the caller.

mod codec;
mod config;
mod engine;
mod error;
mod frame;
mod validate;

pub use config::{Algorithm, CipherConfig, Secret};
pub use error::CodecError;
pub use frame::{Frame, MAX_ENCODED_LEN};

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use serde::{de::DeserializeOwned, Serialize};

/// Seal a session payload into an encoded cookie string.
///
/// The payload must serialise to a structured JSON value (object or array);
/// bare primitives and null are rejected so a cookie always carries a
/// record, never a stray scalar.
///
/// # Errors
///
/// - [`CodecError::InvalidPayload`] — null, primitive, or unserialisable payload.
/// - [`CodecError::InvalidConfig`] — missing or incompatible configuration.
/// - [`CodecError::EncryptionFailure`] — the underlying cipher failed.
/// - [`CodecError::SizeLimitExceeded`] — output above [`MAX_ENCODED_LEN`] bytes.
pub fn encode<T: Serialize>(payload: &T, config: &CipherConfig) -> Result<String, CodecError> {
    let value =
        serde_json::to_value(payload).map_err(|e| CodecError::InvalidPayload(e.to_string()))?;
    validate::encodable(&value)?;
    let algorithm = validate::config(config)?;

    let mut iv = vec![0u8; config.iv_length];
    OsRng.fill_bytes(&mut iv);

    let plaintext = codec::serialize(&value)?;
    let (ciphertext, auth_tag) =
        engine::encrypt(algorithm, &config.secret, &iv, plaintext.as_bytes())?;
    let encoded = Frame {
        iv,
        auth_tag,
        ciphertext,
    }
    .join();
    validate::size_bound(&encoded)?;

    tracing::debug!(%algorithm, encoded_len = encoded.len(), "session payload encoded");
    Ok(encoded)
}

/// Open an encoded cookie string back into the session payload.
///
/// # Errors
///
/// - [`CodecError::InvalidInput`] — empty input text.
/// - [`CodecError::InvalidConfig`] — missing or incompatible configuration.
/// - [`CodecError::MalformedFrame`] — the text is not a valid frame.
/// - [`CodecError::AuthenticationFailure`] — tag verification failed.
/// - [`CodecError::CorruptPayload`] — decrypted bytes are not a valid payload.
pub fn decode<T: DeserializeOwned>(text: &str, config: &CipherConfig) -> Result<T, CodecError> {
    validate::decodable(text)?;
    let algorithm = validate::config(config)?;

    let frame = Frame::split(text)?;
    let plaintext = engine::decrypt(
        algorithm,
        &config.secret,
        &frame.iv,
        &frame.auth_tag,
        &frame.ciphertext,
    )?;
    let value = codec::deserialize(&plaintext)?;

    tracing::debug!(%algorithm, "session payload decoded");
    serde_json::from_value(value).map_err(|e| CodecError::CorruptPayload(e.to_string()))
}
