//! Text envelope: the public face of the protocol
//!
//! ```text
//! seal: &str --utf8--> bytes --ECDH+HKDF+AEAD--> SealedBox --pack--> blob --base64--> String
//! open: String --base64--> blob --unpack--> SealedBox --AEAD+HKDF+ECDH--> bytes --utf8--> String
//! ```
//!
//! Both parties must use the same salt. The sender seals with
//! `(own = sender secret, peer = recipient public)` and the recipient opens
//! with `(own = recipient secret, peer = sender public)`; ECDH makes those
//! agree on the same key.
//!
//! # Examples
//!
//! ```ignore
//! let alice = SecretKey::generate()?;
//! let bob = SecretKey::generate()?;
//!
//! let sealed = seal_text("hello", &alice, &bob.public(), "test-salt")?;
//! let opened = open_text(&sealed, &bob, &alice.public(), "test-salt")?;
//! assert_eq!(opened, "hello");
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::crypto::{
    AeadCipher, Aes256GcmCipher, EcdhP256, HkdfSha256, KeyAgreement, KeyDerivation, PublicKey,
    SealedBox, SecretKey, SymmetricKey,
};
use crate::error::SealError;

/// Composes key agreement, key derivation and an AEAD cipher into the
/// sealing protocol
///
/// `Envelope::default()` is the interoperable suite: P-256 ECDH,
/// HKDF-SHA256 with empty info, AES-256-GCM with empty AAD.
#[derive(Debug, Clone, Copy, Default)]
pub struct Envelope<A = EcdhP256, D = HkdfSha256, C = Aes256GcmCipher> {
    agreement: A,
    derivation: D,
    cipher: C,
}

impl<A, D, C> Envelope<A, D, C>
where
    A: KeyAgreement,
    D: KeyDerivation,
    C: AeadCipher,
{
    pub fn new(agreement: A, derivation: D, cipher: C) -> Self {
        Self {
            agreement,
            derivation,
            cipher,
        }
    }

    /// Agree, derive, and drop the shared secret before returning
    fn symmetric_key(
        &self,
        own: &A::SecretKey,
        peer: &A::PublicKey,
        salt: &[u8],
    ) -> Result<SymmetricKey, SealError> {
        let shared = self.agreement.agree(own, peer)?;
        self.derivation.derive(&shared, salt)
    }

    /// Seal bytes for `peer`, binding `aad` into the tag
    ///
    /// The AAD is not transmitted; the recipient must supply the same value.
    pub fn seal_with_aad(
        &self,
        plaintext: &[u8],
        own: &A::SecretKey,
        peer: &A::PublicKey,
        salt: &[u8],
        aad: &[u8],
    ) -> Result<SealedBox, SealError> {
        tracing::debug!(
            "sealing {} bytes (salt {} bytes, aad {} bytes)",
            plaintext.len(),
            salt.len(),
            aad.len()
        );
        let key = self.symmetric_key(own, peer, salt)?;
        self.cipher.seal(&key, plaintext, aad)
    }

    /// Open a box sealed by `peer` with [`Envelope::seal_with_aad`]
    pub fn open_with_aad(
        &self,
        sealed: &SealedBox,
        own: &A::SecretKey,
        peer: &A::PublicKey,
        salt: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, SealError> {
        tracing::debug!(
            "opening {} byte box (salt {} bytes, aad {} bytes)",
            sealed.len(),
            salt.len(),
            aad.len()
        );
        let key = self.symmetric_key(own, peer, salt)?;
        self.cipher.open(&key, sealed, aad).map_err(|e| {
            tracing::debug!("failed to open sealed box: {}", e);
            e
        })
    }

    pub fn seal(
        &self,
        plaintext: &[u8],
        own: &A::SecretKey,
        peer: &A::PublicKey,
        salt: &[u8],
    ) -> Result<SealedBox, SealError> {
        self.seal_with_aad(plaintext, own, peer, salt, &[])
    }

    pub fn open(
        &self,
        sealed: &SealedBox,
        own: &A::SecretKey,
        peer: &A::PublicKey,
        salt: &[u8],
    ) -> Result<Vec<u8>, SealError> {
        self.open_with_aad(sealed, own, peer, salt, &[])
    }

    /// Seal bytes into a combined `nonce || ciphertext || tag` blob
    pub fn seal_bytes(
        &self,
        plaintext: &[u8],
        own: &A::SecretKey,
        peer: &A::PublicKey,
        salt: &[u8],
    ) -> Result<Vec<u8>, SealError> {
        Ok(self.seal(plaintext, own, peer, salt)?.pack())
    }

    /// Open a combined blob
    ///
    /// # Errors
    ///
    /// - [`SealError::MalformedBlob`] if the blob cannot hold a nonce and tag;
    ///   no cryptographic work is done in that case
    /// - [`SealError::AuthenticationFailed`] on tag mismatch
    pub fn open_bytes(
        &self,
        blob: &[u8],
        own: &A::SecretKey,
        peer: &A::PublicKey,
        salt: &[u8],
    ) -> Result<Vec<u8>, SealError> {
        let sealed = SealedBox::unpack(blob)?;
        self.open(&sealed, own, peer, salt)
    }

    /// Seal a string into standard, padded base64 text
    pub fn seal_text(
        &self,
        plaintext: &str,
        own: &A::SecretKey,
        peer: &A::PublicKey,
        salt: &[u8],
    ) -> Result<String, SealError> {
        let blob = self.seal_bytes(plaintext.as_bytes(), own, peer, salt)?;
        Ok(STANDARD.encode(blob))
    }

    /// Open base64 text produced by [`Envelope::seal_text`]
    ///
    /// # Errors
    ///
    /// - [`SealError::MalformedBlob`] if the text is not valid base64 or the
    ///   decoded blob is too short
    /// - [`SealError::AuthenticationFailed`] on tag mismatch
    /// - [`SealError::DecodedTextInvalid`] if the authenticated plaintext is
    ///   not UTF-8
    pub fn open_text(
        &self,
        encoded: &str,
        own: &A::SecretKey,
        peer: &A::PublicKey,
        salt: &[u8],
    ) -> Result<String, SealError> {
        let blob = STANDARD.decode(encoded)?;
        let plaintext = self.open_bytes(&blob, own, peer, salt)?;
        String::from_utf8(plaintext).map_err(SealError::DecodedTextInvalid)
    }
}

fn default_envelope() -> Envelope {
    Envelope::default()
}

/// Seal `plaintext` from `own` to `peer` with the default suite
pub fn seal_text(
    plaintext: &str,
    own: &SecretKey,
    peer: &PublicKey,
    salt: impl AsRef<[u8]>,
) -> Result<String, SealError> {
    default_envelope().seal_text(plaintext, own, peer, salt.as_ref())
}

/// Open base64 text sealed for `own` by `peer` with the default suite
pub fn open_text(
    encoded: &str,
    own: &SecretKey,
    peer: &PublicKey,
    salt: impl AsRef<[u8]>,
) -> Result<String, SealError> {
    default_envelope().open_text(encoded, own, peer, salt.as_ref())
}

/// Byte-level [`seal_text`]: returns the combined blob without base64
pub fn seal_bytes(
    plaintext: &[u8],
    own: &SecretKey,
    peer: &PublicKey,
    salt: impl AsRef<[u8]>,
) -> Result<Vec<u8>, SealError> {
    default_envelope().seal_bytes(plaintext, own, peer, salt.as_ref())
}

/// Byte-level [`open_text`]: takes the combined blob without base64
pub fn open_bytes(
    blob: &[u8],
    own: &SecretKey,
    peer: &PublicKey,
    salt: impl AsRef<[u8]>,
) -> Result<Vec<u8>, SealError> {
    default_envelope().open_bytes(blob, own, peer, salt.as_ref())
}
