//! HKDF key derivation
//!
//! Turns an ECDH shared secret and the caller's salt into the AEAD key.
//! Derivation is deterministic, which is what lets the recipient recompute
//! the sender's key from their own half of the key pair.

use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::agreement::SharedSecret;
use crate::error::SealError;

/// Size of the derived symmetric key in bytes (AES-256)
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// HKDF `info` input. Empty: the salt is the only contextual binding.
const HKDF_INFO: &[u8] = b"";

/// Derived AEAD key, scoped to a single seal or open call
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_SIZE]);

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

impl From<[u8; SYMMETRIC_KEY_SIZE]> for SymmetricKey {
    fn from(bytes: [u8; SYMMETRIC_KEY_SIZE]) -> Self {
        SymmetricKey(bytes)
    }
}

impl SymmetricKey {
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Expands a shared secret and salt into a symmetric key
pub trait KeyDerivation {
    /// # Errors
    ///
    /// Returns [`SealError::DerivationFailed`] only if the underlying
    /// primitive rejects its parameters.
    fn derive(&self, shared: &SharedSecret, salt: &[u8]) -> Result<SymmetricKey, SealError>;
}

/// HKDF-SHA256 extract-and-expand with an empty `info`
#[derive(Debug, Clone, Copy, Default)]
pub struct HkdfSha256;

impl KeyDerivation for HkdfSha256 {
    fn derive(&self, shared: &SharedSecret, salt: &[u8]) -> Result<SymmetricKey, SealError> {
        let hk = Hkdf::<Sha256>::new(Some(salt), shared.bytes());
        let mut key = SymmetricKey([0u8; SYMMETRIC_KEY_SIZE]);
        hk.expand(HKDF_INFO, &mut key.0)
            .map_err(|_| SealError::DerivationFailed)?;
        Ok(key)
    }
}
