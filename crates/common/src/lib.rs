/**
 * Cryptographic types and operations.
 *  - P-256 public and private key implementations
 *  - ECDH key agreement, HKDF key derivation,
 *    AES-GCM authenticated encryption
 *  - Combined-box framing of sealed messages
 */
pub mod crypto;
/**
 * Text envelope over the crypto primitives.
 *  UTF-8 in, base64 out, and back again.
 */
pub mod envelope;
/**
 * Error taxonomy shared by every sealing
 *  and opening path.
 */
pub mod error;

pub mod prelude {
    pub use crate::crypto::{PublicKey, SealedBox, SecretKey};
    pub use crate::envelope::{open_bytes, open_text, seal_bytes, seal_text, Envelope};
    pub use crate::error::SealError;
}
