//! The three-component wire frame and its text encoding.
//!
//! # Cookie format
//!
//! ```text
//! base64( hex(iv) "." hex(auth_tag) "." hex(ciphertext) )
//! ```
//!
//! Standard base64 alphabet with padding. `hex(auth_tag)` is the empty string
//! for cipher modes that produce no tag, so the decoded text for those modes
//! reads `<iv>..<ciphertext>`. Components are positional: anything after the
//! third `.`-separated component is ignored on parse.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::CodecError;

/// Practical per-cookie byte ceiling for the encoded output.
///
/// Browsers commonly cap a single cookie at 4096 bytes including name and
/// attributes; 4093 leaves room for `name=` plus the terminator.
pub const MAX_ENCODED_LEN: usize = 4093;

/// One encrypted record in flight: initialization vector, authentication
/// tag, ciphertext. Lives only within a single encode or decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Per-call random initialization vector.
    pub iv: Vec<u8>,
    /// Authentication tag; empty for modes that produce none.
    pub auth_tag: Vec<u8>,
    /// Encrypted payload bytes.
    pub ciphertext: Vec<u8>,
}

impl Frame {
    /// Encode this frame to its transport representation.
    pub fn join(&self) -> String {
        let joined = format!(
            "{}.{}.{}",
            hex::encode(&self.iv),
            hex::encode(&self.auth_tag),
            hex::encode(&self.ciphertext),
        );
        STANDARD.encode(joined)
    }

    /// Parse a transport string back into a [`Frame`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedFrame`] for invalid base64, a decoded
    /// form that is not text or lacks the `.` delimiter, fewer than three
    /// components, an empty IV or ciphertext component, or invalid hex in
    /// any component. The tag component alone may be empty.
    pub fn split(encoded: &str) -> Result<Self, CodecError> {
        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| CodecError::MalformedFrame("invalid base64".into()))?;
        let text = String::from_utf8(decoded)
            .map_err(|_| CodecError::MalformedFrame("frame is not text".into()))?;

        if !text.contains('.') {
            return Err(CodecError::MalformedFrame("missing delimiter".into()));
        }
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() < 3 {
            return Err(CodecError::MalformedFrame(format!(
                "expected 3 components, got {}",
                parts.len()
            )));
        }
        if parts[0].is_empty() || parts[2].is_empty() {
            return Err(CodecError::MalformedFrame(
                "empty initialization vector or ciphertext component".into(),
            ));
        }

        Ok(Self {
            iv: decode_hex(parts[0], "initialization vector")?,
            auth_tag: decode_hex(parts[1], "authentication tag")?,
            ciphertext: decode_hex(parts[2], "ciphertext")?,
        })
    }
}

fn decode_hex(component: &str, label: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(component)
        .map_err(|_| CodecError::MalformedFrame(format!("invalid hex in {label} component")))
}
