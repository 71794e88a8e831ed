//! Session payload serialization.
//!
//! The payload crosses the cipher boundary as canonical JSON text. Parsing
//! on the way out is strict: anything the decrypted bytes could be other
//! than a valid, non-null JSON value is a [`CodecError::CorruptPayload`].

use serde_json::Value;

use crate::error::CodecError;

/// Stringify a validated payload for encryption.
pub(crate) fn serialize(value: &Value) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(|e| CodecError::InvalidPayload(e.to_string()))
}

/// Parse decrypted plaintext back into a JSON value.
///
/// # Errors
///
/// Returns [`CodecError::CorruptPayload`] if the bytes are not UTF-8, are
/// not valid JSON, or parse to JSON `null`. The null check guards the
/// "parse succeeded yet produced nothing" case; a decrypted cookie never
/// legitimately contains `null` because encode rejects it up front.
pub(crate) fn deserialize(plaintext: &[u8]) -> Result<Value, CodecError> {
    let text = std::str::from_utf8(plaintext)
        .map_err(|_| CodecError::CorruptPayload("decrypted bytes are not UTF-8".into()))?;
    let value: Value = serde_json::from_str(text)
        .map_err(|_| CodecError::CorruptPayload("decrypted text is not valid JSON".into()))?;
    if value.is_null() {
        return Err(CodecError::CorruptPayload(
            "decrypted text parsed to nothing".into(),
        ));
    }
    Ok(value)
}
