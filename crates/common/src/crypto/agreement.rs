//! Elliptic-curve Diffie-Hellman key agreement
//!
//! Both parties arrive at the same shared secret: `a * B == b * A`. The
//! secret is only ever an intermediate value. It is handed straight to key
//! derivation and wiped when dropped.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::keys::{PublicKey, SecretKey};
use crate::error::SealError;

/// Size of a P-256 ECDH shared secret (the affine x-coordinate) in bytes
pub const SHARED_SECRET_SIZE: usize = 32;

/// Raw ECDH output, zeroized on drop
///
/// Deliberately not `Clone` and not printable.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_SIZE]);

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

impl From<[u8; SHARED_SECRET_SIZE]> for SharedSecret {
    fn from(bytes: [u8; SHARED_SECRET_SIZE]) -> Self {
        SharedSecret(bytes)
    }
}

impl SharedSecret {
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Derives a raw shared secret from our private key and the peer's public key
pub trait KeyAgreement {
    type SecretKey;
    type PublicKey;

    /// # Errors
    ///
    /// Returns [`SealError::InvalidKey`] if either key cannot be used.
    fn agree(
        &self,
        own: &Self::SecretKey,
        peer: &Self::PublicKey,
    ) -> Result<SharedSecret, SealError>;
}

/// ECDH over NIST P-256
///
/// Key validity is enforced when a [`SecretKey`] or [`PublicKey`] is
/// constructed, so by the time we get here both are known good.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdhP256;

impl KeyAgreement for EcdhP256 {
    type SecretKey = SecretKey;
    type PublicKey = PublicKey;

    fn agree(&self, own: &SecretKey, peer: &PublicKey) -> Result<SharedSecret, SealError> {
        let shared = p256::ecdh::diffie_hellman(
            own.as_inner().to_nonzero_scalar(),
            peer.as_inner().as_affine(),
        );
        let mut bytes = [0u8; SHARED_SECRET_SIZE];
        bytes.copy_from_slice(shared.raw_secret_bytes());
        let secret = SharedSecret(bytes);
        bytes.zeroize();
        Ok(secret)
    }
}
