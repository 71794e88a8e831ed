//! Per-call cipher configuration: algorithm table and key material.
//!
//! The codec never generates or stores keys; it is handed a [`CipherConfig`]
//! on every call and holds nothing across calls. Algorithm capabilities are
//! resolved once through an explicit lookup ([`Algorithm::resolve`]) rather
//! than probed by substring, so a name is either a known mode with known
//! IV/key/tag parameters or it is rejected outright.

use std::fmt;

/// Supported symmetric cipher modes.
///
/// Tag-producing variants are authenticated modes: their ciphertext is
/// accompanied by a 16-byte verification tag and decryption fails if the tag
/// does not match. The CBC and CTR variants produce no tag; the frame carries
/// an empty tag component for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// AES-128 in Galois/Counter mode.
    Aes128Gcm,
    /// AES-256 in Galois/Counter mode.
    Aes256Gcm,
    /// AES-256-GCM-SIV (RFC 8452), nonce-misuse-resistant.
    Aes256GcmSiv,
    /// AES-256 in Counter-with-CBC-MAC mode (16-byte tag, 12-byte nonce).
    Aes256Ccm,
    /// AES-128 in CBC mode with PKCS#7 padding. Unauthenticated.
    Aes128Cbc,
    /// AES-256 in CBC mode with PKCS#7 padding. Unauthenticated.
    Aes256Cbc,
    /// AES-128 in CTR mode (128-bit big-endian counter). Unauthenticated.
    Aes128Ctr,
    /// AES-256 in CTR mode (128-bit big-endian counter). Unauthenticated.
    Aes256Ctr,
}

impl Algorithm {
    /// Look up an algorithm by its configuration name, case-insensitively.
    ///
    /// Returns `None` for names outside the supported set; the validator
    /// turns that into [`CodecError::InvalidConfig`](crate::CodecError).
    pub fn resolve(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "aes-128-gcm" => Some(Self::Aes128Gcm),
            "aes-256-gcm" => Some(Self::Aes256Gcm),
            "aes-256-gcm-siv" => Some(Self::Aes256GcmSiv),
            "aes-256-ccm" => Some(Self::Aes256Ccm),
            "aes-128-cbc" => Some(Self::Aes128Cbc),
            "aes-256-cbc" => Some(Self::Aes256Cbc),
            "aes-128-ctr" => Some(Self::Aes128Ctr),
            "aes-256-ctr" => Some(Self::Aes256Ctr),
            _ => None,
        }
    }

    /// Canonical configuration name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes128Gcm => "aes-128-gcm",
            Self::Aes256Gcm => "aes-256-gcm",
            Self::Aes256GcmSiv => "aes-256-gcm-siv",
            Self::Aes256Ccm => "aes-256-ccm",
            Self::Aes128Cbc => "aes-128-cbc",
            Self::Aes256Cbc => "aes-256-cbc",
            Self::Aes128Ctr => "aes-128-ctr",
            Self::Aes256Ctr => "aes-256-ctr",
        }
    }

    /// Whether this mode produces an authentication tag.
    pub fn produces_tag(self) -> bool {
        matches!(
            self,
            Self::Aes128Gcm | Self::Aes256Gcm | Self::Aes256GcmSiv | Self::Aes256Ccm
        )
    }

    /// Required initialization-vector length in bytes.
    pub fn iv_len(self) -> usize {
        match self {
            Self::Aes128Gcm | Self::Aes256Gcm | Self::Aes256GcmSiv | Self::Aes256Ccm => 12,
            Self::Aes128Cbc | Self::Aes256Cbc | Self::Aes128Ctr | Self::Aes256Ctr => 16,
        }
    }

    /// Required key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128Gcm | Self::Aes128Cbc | Self::Aes128Ctr => 16,
            Self::Aes256Gcm
            | Self::Aes256GcmSiv
            | Self::Aes256Ccm
            | Self::Aes256Cbc
            | Self::Aes256Ctr => 32,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Symmetric key material supplied by the caller.
///
/// The buffer is overwritten with zeroes on drop to minimise the window
/// during which plaintext key material lives in RAM, and `Debug` never
/// prints the bytes.
#[derive(Clone)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Wrap raw key bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no key material is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw key bytes for cipher construction.
    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("Secret([REDACTED])")
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Immutable per-call configuration for [`encode`](crate::encode) and
/// [`decode`](crate::decode).
#[derive(Debug, Clone)]
pub struct CipherConfig {
    /// Cipher mode name, e.g. `"aes-256-gcm"`. Resolved via
    /// [`Algorithm::resolve`].
    pub algorithm: String,
    /// Initialization-vector length in bytes; must match the algorithm's
    /// required IV size.
    pub iv_length: usize,
    /// Symmetric key material; must be exactly the algorithm's key length.
    pub secret: Secret,
}

impl CipherConfig {
    /// Construct a configuration from its three required fields.
    pub fn new(algorithm: impl Into<String>, iv_length: usize, secret: impl Into<Secret>) -> Self {
        Self {
            algorithm: algorithm.into(),
            iv_length,
            secret: secret.into(),
        }
    }
}
