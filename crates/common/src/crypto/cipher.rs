//! Authenticated encryption
//!
//! AES-256-GCM with a fresh random 96-bit nonce per seal. The tag is checked
//! in constant time before any plaintext is returned.

use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Key, Nonce, Tag,
};

use super::kdf::SymmetricKey;
use super::sealed_box::{SealedBox, NONCE_SIZE, TAG_SIZE};
use crate::error::SealError;

/// Seals and opens bytes under a derived key
///
/// Implementations must use [`NONCE_SIZE`]-byte nonces and [`TAG_SIZE`]-byte
/// tags so the combined-box framing stays valid.
pub trait AeadCipher {
    /// # Errors
    ///
    /// Returns [`SealError::RandomnessUnavailable`] if no nonce can be drawn.
    fn seal(&self, key: &SymmetricKey, plaintext: &[u8], aad: &[u8])
        -> Result<SealedBox, SealError>;

    /// # Errors
    ///
    /// Returns [`SealError::AuthenticationFailed`] on any tag mismatch,
    /// whatever the cause.
    fn open(&self, key: &SymmetricKey, sealed: &SealedBox, aad: &[u8])
        -> Result<Vec<u8>, SealError>;
}

/// AES-256-GCM, 12-byte nonce, 16-byte tag
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256GcmCipher;

impl AeadCipher for Aes256GcmCipher {
    fn seal(
        &self,
        key: &SymmetricKey,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<SealedBox, SealError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.bytes()));

        // fresh nonce per seal, no counter
        let mut nonce = [0u8; NONCE_SIZE];
        getrandom::getrandom(&mut nonce)?;

        let mut ciphertext = plaintext.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&nonce), aad, &mut ciphertext)
            .map_err(|_| SealError::PlaintextTooLong(plaintext.len()))?;

        let mut sealed = SealedBox {
            nonce,
            ciphertext,
            tag: [0; TAG_SIZE],
        };
        sealed.tag.copy_from_slice(&tag);
        Ok(sealed)
    }

    fn open(
        &self,
        key: &SymmetricKey,
        sealed: &SealedBox,
        aad: &[u8],
    ) -> Result<Vec<u8>, SealError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.bytes()));

        let mut plaintext = sealed.ciphertext.clone();
        cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(&sealed.nonce),
                aad,
                &mut plaintext,
                Tag::from_slice(&sealed.tag),
            )
            .map_err(|_| SealError::AuthenticationFailed)?;

        Ok(plaintext)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn key(byte: u8) -> SymmetricKey {
        SymmetricKey::from([byte; 32])
    }

    #[test]
    fn test_seal_open() {
        let data = b"hello world, this is a test message for encryption";
        let sealed = Aes256GcmCipher.seal(&key(1), data, b"").unwrap();

        assert_eq!(sealed.ciphertext.len(), data.len());
        assert_ne!(sealed.ciphertext.as_slice(), data.as_slice());

        let opened = Aes256GcmCipher.open(&key(1), &sealed, b"").unwrap();
        assert_eq!(opened, data.to_vec());
    }

    #[test]
    fn test_empty_plaintext() {
        let sealed = Aes256GcmCipher.seal(&key(1), b"", b"").unwrap();
        assert!(sealed.ciphertext.is_empty());
        assert!(Aes256GcmCipher.open(&key(1), &sealed, b"").unwrap().is_empty());
    }

    #[test]
    fn test_fresh_nonce_per_seal() {
        let a = Aes256GcmCipher.seal(&key(1), b"same", b"").unwrap();
        let b = Aes256GcmCipher.seal(&key(1), b"same", b"").unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_wrong_key_fails_closed() {
        let sealed = Aes256GcmCipher.seal(&key(1), b"secret", b"").unwrap();
        assert!(matches!(
            Aes256GcmCipher.open(&key(2), &sealed, b""),
            Err(SealError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_tampered_parts_fail_closed() {
        let sealed = Aes256GcmCipher.seal(&key(1), b"secret", b"").unwrap();

        let mut bad_nonce = sealed.clone();
        bad_nonce.nonce[0] ^= 0x01;
        let mut bad_ciphertext = sealed.clone();
        bad_ciphertext.ciphertext[3] ^= 0x80;
        let mut bad_tag = sealed.clone();
        bad_tag.tag[TAG_SIZE - 1] ^= 0x01;

        for tampered in [bad_nonce, bad_ciphertext, bad_tag] {
            assert!(matches!(
                Aes256GcmCipher.open(&key(1), &tampered, b""),
                Err(SealError::AuthenticationFailed)
            ));
        }
    }

    #[test]
    fn test_aad_is_authenticated() {
        let sealed = Aes256GcmCipher.seal(&key(1), b"secret", b"context").unwrap();
        assert!(Aes256GcmCipher.open(&key(1), &sealed, b"context").is_ok());
        assert!(matches!(
            Aes256GcmCipher.open(&key(1), &sealed, b""),
            Err(SealError::AuthenticationFailed)
        ));
    }
}
