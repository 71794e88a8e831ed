//! Front-loaded input validation.
//!
//! Every public operation runs these checks before touching a cipher, so bad
//! input, bad configuration, and oversized output each fail fast with their
//! own [`CodecError`] variant instead of surfacing as an opaque crypto error
//! deeper in the pipeline.

use serde_json::Value;

use crate::config::{Algorithm, CipherConfig};
use crate::error::CodecError;
use crate::frame::MAX_ENCODED_LEN;

/// Check the three required configuration fields and resolve the algorithm.
///
/// Fails with [`CodecError::InvalidConfig`] when a field is missing (empty
/// name, zero IV length, empty secret), when the algorithm name is not in
/// the supported set, or when the IV length or secret length does not match
/// what the resolved algorithm requires.
pub(crate) fn config(config: &CipherConfig) -> Result<Algorithm, CodecError> {
    if config.algorithm.is_empty() {
        return Err(CodecError::InvalidConfig("algorithm is required".into()));
    }
    if config.iv_length == 0 {
        return Err(CodecError::InvalidConfig("iv_length is required".into()));
    }
    if config.secret.is_empty() {
        return Err(CodecError::InvalidConfig("secret is required".into()));
    }

    let algorithm = Algorithm::resolve(&config.algorithm).ok_or_else(|| {
        CodecError::InvalidConfig(format!("unsupported algorithm: {}", config.algorithm))
    })?;

    if config.iv_length != algorithm.iv_len() {
        return Err(CodecError::InvalidConfig(format!(
            "{algorithm} requires a {}-byte initialization vector, got iv_length {}",
            algorithm.iv_len(),
            config.iv_length
        )));
    }
    if config.secret.len() != algorithm.key_len() {
        return Err(CodecError::InvalidConfig(format!(
            "{algorithm} requires a {}-byte secret, got {} bytes",
            algorithm.key_len(),
            config.secret.len()
        )));
    }

    Ok(algorithm)
}

/// Check that a payload is a structured value (object or array), not null
/// and not a bare primitive.
pub(crate) fn encodable(value: &Value) -> Result<(), CodecError> {
    match value {
        Value::Object(_) | Value::Array(_) => Ok(()),
        Value::Null => Err(CodecError::InvalidPayload(
            "payload must not be null".into(),
        )),
        other => Err(CodecError::InvalidPayload(format!(
            "payload must be a structured value, got a bare {}",
            json_type_name(other)
        ))),
    }
}

/// Check that decode input is non-empty.
pub(crate) fn decodable(text: &str) -> Result<(), CodecError> {
    if text.is_empty() {
        return Err(CodecError::InvalidInput);
    }
    Ok(())
}

/// Check the encoded cookie against the per-cookie byte ceiling.
pub(crate) fn size_bound(encoded: &str) -> Result<(), CodecError> {
    if encoded.len() > MAX_ENCODED_LEN {
        return Err(CodecError::SizeLimitExceeded(encoded.len()));
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
