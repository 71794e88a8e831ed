//! Uniform encrypt/decrypt over the supported cipher modes.
//!
//! This module is intentionally free of serialization and transport
//! concerns: it maps key, IV, and buffers to buffers, one fresh cipher
//! context per call, and nothing else. Authenticated modes return their
//! 16-byte tag separately from the ciphertext; CBC and CTR return an empty
//! tag and, on decrypt, ignore whatever tag the frame carried.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use aes_gcm::{
    aead::{Aead, KeyInit, Nonce},
    Aes128Gcm, Aes256Gcm,
};
use aes_gcm_siv::Aes256GcmSiv;
use ccm::consts::{U12, U16};

use crate::config::{Algorithm, Secret};
use crate::error::CodecError;

/// Authentication tag length shared by all supported authenticated modes.
pub(crate) const TAG_LEN: usize = 16;

type Aes256Ccm = ccm::Ccm<aes::Aes256, U16, U12>;
type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;
type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

/// Encrypt `plaintext` under a fresh cipher context.
///
/// Returns `(ciphertext, auth_tag)`; the tag is empty for modes that
/// produce none.
///
/// # Errors
///
/// Returns [`CodecError::EncryptionFailure`] if the IV does not match the
/// algorithm's required length or the underlying cipher operation fails.
pub(crate) fn encrypt(
    algorithm: Algorithm,
    secret: &Secret,
    iv: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), CodecError> {
    if iv.len() != algorithm.iv_len() {
        return Err(CodecError::EncryptionFailure(format!(
            "{algorithm} requires a {}-byte initialization vector, got {}",
            algorithm.iv_len(),
            iv.len()
        )));
    }
    let key = secret.expose();
    match algorithm {
        Algorithm::Aes128Gcm => aead_seal(&aead_cipher::<Aes128Gcm>(key)?, iv, plaintext),
        Algorithm::Aes256Gcm => aead_seal(&aead_cipher::<Aes256Gcm>(key)?, iv, plaintext),
        Algorithm::Aes256GcmSiv => aead_seal(&aead_cipher::<Aes256GcmSiv>(key)?, iv, plaintext),
        Algorithm::Aes256Ccm => aead_seal(&aead_cipher::<Aes256Ccm>(key)?, iv, plaintext),
        Algorithm::Aes128Cbc => Ok((cbc_seal::<Aes128CbcEnc>(key, iv, plaintext)?, Vec::new())),
        Algorithm::Aes256Cbc => Ok((cbc_seal::<Aes256CbcEnc>(key, iv, plaintext)?, Vec::new())),
        Algorithm::Aes128Ctr => Ok((ctr_apply::<Aes128Ctr>(key, iv, plaintext)?, Vec::new())),
        Algorithm::Aes256Ctr => Ok((ctr_apply::<Aes256Ctr>(key, iv, plaintext)?, Vec::new())),
    }
}

/// Decrypt `ciphertext` under a fresh cipher context, verifying `auth_tag`
/// for authenticated modes.
///
/// # Errors
///
/// Returns [`CodecError::MalformedFrame`] if the frame's IV has the wrong
/// length, [`CodecError::AuthenticationFailure`] if tag verification fails
/// (including a missing or short tag for an authenticated mode), and
/// [`CodecError::CorruptPayload`] if CBC unpadding fails.
pub(crate) fn decrypt(
    algorithm: Algorithm,
    secret: &Secret,
    iv: &[u8],
    auth_tag: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CodecError> {
    if iv.len() != algorithm.iv_len() {
        return Err(CodecError::MalformedFrame(format!(
            "initialization vector must be {} bytes for {algorithm}, got {}",
            algorithm.iv_len(),
            iv.len()
        )));
    }
    let key = secret.expose();
    match algorithm {
        Algorithm::Aes128Gcm => aead_open(&aead_cipher::<Aes128Gcm>(key)?, iv, auth_tag, ciphertext),
        Algorithm::Aes256Gcm => aead_open(&aead_cipher::<Aes256Gcm>(key)?, iv, auth_tag, ciphertext),
        Algorithm::Aes256GcmSiv => {
            aead_open(&aead_cipher::<Aes256GcmSiv>(key)?, iv, auth_tag, ciphertext)
        }
        Algorithm::Aes256Ccm => aead_open(&aead_cipher::<Aes256Ccm>(key)?, iv, auth_tag, ciphertext),
        Algorithm::Aes128Cbc => cbc_open::<Aes128CbcDec>(key, iv, ciphertext),
        Algorithm::Aes256Cbc => cbc_open::<Aes256CbcDec>(key, iv, ciphertext),
        Algorithm::Aes128Ctr => ctr_apply::<Aes128Ctr>(key, iv, ciphertext),
        Algorithm::Aes256Ctr => ctr_apply::<Aes256Ctr>(key, iv, ciphertext),
    }
}

fn aead_cipher<C: KeyInit>(key: &[u8]) -> Result<C, CodecError> {
    // Key length is validated upstream; a failure here means the validator
    // and the algorithm table disagree.
    C::new_from_slice(key)
        .map_err(|_| CodecError::EncryptionFailure("cipher construction failed".into()))
}

fn aead_seal<C: Aead>(
    cipher: &C,
    iv: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), CodecError> {
    // IV length equals the mode's nonce size; checked by the caller.
    let nonce = Nonce::<C>::from_slice(iv);
    let mut sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CodecError::EncryptionFailure("aead encryption failed".into()))?;
    // The tag occupies the tail of the finalized output, so it cannot be
    // read before encryption over the full plaintext has completed.
    let auth_tag = sealed.split_off(sealed.len() - TAG_LEN);
    Ok((sealed, auth_tag))
}

fn aead_open<C: Aead>(
    cipher: &C,
    iv: &[u8],
    auth_tag: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CodecError> {
    if auth_tag.len() != TAG_LEN {
        return Err(CodecError::AuthenticationFailure);
    }
    let nonce = Nonce::<C>::from_slice(iv);
    let mut sealed = Vec::with_capacity(ciphertext.len() + auth_tag.len());
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(auth_tag);
    cipher
        .decrypt(nonce, sealed.as_slice())
        .map_err(|_| CodecError::AuthenticationFailure)
}

fn cbc_seal<E>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CodecError>
where
    E: KeyIvInit + BlockEncryptMut,
{
    let enc = E::new_from_slices(key, iv)
        .map_err(|_| CodecError::EncryptionFailure("cipher construction failed".into()))?;
    Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn cbc_open<D>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CodecError>
where
    D: KeyIvInit + BlockDecryptMut,
{
    let dec = D::new_from_slices(key, iv)
        .map_err(|_| CodecError::EncryptionFailure("cipher construction failed".into()))?;
    dec.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CodecError::CorruptPayload("block padding check failed".into()))
}

fn ctr_apply<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, CodecError>
where
    C: KeyIvInit + StreamCipher,
{
    let mut cipher = C::new_from_slices(key, iv)
        .map_err(|_| CodecError::EncryptionFailure("cipher construction failed".into()))?;
    let mut buf = data.to_vec();
    cipher.apply_keystream(&mut buf);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_128: &[u8] = b"0123456789abcdef";
    const KEY_256: &[u8] = b"0123456789abcdef0123456789abcdef";
    const PLAINTEXT: &[u8] = br#"{"user":"alice","roles":["admin"]}"#;

    fn round_trip(algorithm: Algorithm, key: &[u8]) {
        let secret = Secret::from(key);
        let iv = vec![0x24u8; algorithm.iv_len()];
        let (ciphertext, tag) = encrypt(algorithm, &secret, &iv, PLAINTEXT).unwrap();
        assert_eq!(tag.len(), if algorithm.produces_tag() { TAG_LEN } else { 0 });
        let opened = decrypt(algorithm, &secret, &iv, &tag, &ciphertext).unwrap();
        assert_eq!(opened, PLAINTEXT);
    }

    #[test]
    fn round_trips_all_modes() {
        round_trip(Algorithm::Aes128Gcm, KEY_128);
        round_trip(Algorithm::Aes256Gcm, KEY_256);
        round_trip(Algorithm::Aes256GcmSiv, KEY_256);
        round_trip(Algorithm::Aes256Ccm, KEY_256);
        round_trip(Algorithm::Aes128Cbc, KEY_128);
        round_trip(Algorithm::Aes256Cbc, KEY_256);
        round_trip(Algorithm::Aes128Ctr, KEY_128);
        round_trip(Algorithm::Aes256Ctr, KEY_256);
    }

    #[test]
    fn cbc_handles_non_block_aligned_input() {
        let secret = Secret::from(KEY_256);
        let iv = vec![0u8; 16];
        let (ciphertext, _) = encrypt(Algorithm::Aes256Cbc, &secret, &iv, b"x").unwrap();
        // One byte pads out to a full block.
        assert_eq!(ciphertext.len(), 16);
        let opened = decrypt(Algorithm::Aes256Cbc, &secret, &iv, &[], &ciphertext).unwrap();
        assert_eq!(opened, b"x");
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let secret = Secret::from(KEY_256);
        let iv = vec![7u8; 12];
        let (mut ciphertext, tag) = encrypt(Algorithm::Aes256Gcm, &secret, &iv, PLAINTEXT).unwrap();
        ciphertext[0] ^= 0xFF;
        let err = decrypt(Algorithm::Aes256Gcm, &secret, &iv, &tag, &ciphertext).unwrap_err();
        assert!(matches!(err, CodecError::AuthenticationFailure));
    }

    #[test]
    fn tampered_tag_fails_authentication() {
        let secret = Secret::from(KEY_256);
        let iv = vec![7u8; 12];
        let (ciphertext, mut tag) = encrypt(Algorithm::Aes256Gcm, &secret, &iv, PLAINTEXT).unwrap();
        tag[TAG_LEN - 1] ^= 0x01;
        let err = decrypt(Algorithm::Aes256Gcm, &secret, &iv, &tag, &ciphertext).unwrap_err();
        assert!(matches!(err, CodecError::AuthenticationFailure));
    }

    #[test]
    fn missing_tag_fails_authentication() {
        let secret = Secret::from(KEY_256);
        let iv = vec![7u8; 12];
        let (ciphertext, _) = encrypt(Algorithm::Aes256Gcm, &secret, &iv, PLAINTEXT).unwrap();
        let err = decrypt(Algorithm::Aes256Gcm, &secret, &iv, &[], &ciphertext).unwrap_err();
        assert!(matches!(err, CodecError::AuthenticationFailure));
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let iv = vec![7u8; 12];
        let (ciphertext, tag) =
            encrypt(Algorithm::Aes256Gcm, &Secret::from(KEY_256), &iv, PLAINTEXT).unwrap();
        let other = Secret::from(&b"ffffffffffffffffffffffffffffffff"[..]);
        let err = decrypt(Algorithm::Aes256Gcm, &other, &iv, &tag, &ciphertext).unwrap_err();
        assert!(matches!(err, CodecError::AuthenticationFailure));
    }

    #[test]
    fn ctr_ignores_stray_tag_component() {
        let secret = Secret::from(KEY_256);
        let iv = vec![3u8; 16];
        let (ciphertext, _) = encrypt(Algorithm::Aes256Ctr, &secret, &iv, PLAINTEXT).unwrap();
        let opened =
            decrypt(Algorithm::Aes256Ctr, &secret, &iv, &[0xAA; 16], &ciphertext).unwrap();
        assert_eq!(opened, PLAINTEXT);
    }

    #[test]
    fn encrypt_rejects_wrong_iv_length() {
        let err = encrypt(Algorithm::Aes256Gcm, &Secret::from(KEY_256), &[0u8; 16], b"x")
            .unwrap_err();
        assert!(matches!(err, CodecError::EncryptionFailure(_)));
    }

    #[test]
    fn decrypt_rejects_wrong_iv_length() {
        let err = decrypt(
            Algorithm::Aes256Gcm,
            &Secret::from(KEY_256),
            &[0u8; 7],
            &[0u8; TAG_LEN],
            &[0u8; 16],
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::MalformedFrame(_)));
    }
}
