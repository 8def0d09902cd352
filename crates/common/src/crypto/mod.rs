//! Cryptographic primitives for sealed text envelopes
//!
//! The protocol is built from three capabilities, each behind its own trait:
//!
//! - **Key Agreement** ([`KeyAgreement`]): ECDH over NIST P-256
//! - **Key Derivation** ([`KeyDerivation`]): HKDF-SHA256, salt supplied by the caller
//! - **Authenticated Cipher** ([`AeadCipher`]): AES-256-GCM
//!
//! plus the fixed [`SealedBox`] framing shared by all of them.
//!
//! # Security Model
//!
//! ## Keys
//! Each party holds a long-term P-256 key pair. Public keys are exchanged out
//! of band and validated on parse; an off-curve point never reaches ECDH.
//!
//! ## Per-message keys
//! Every seal and open recomputes `HKDF(salt, ECDH(own, peer))`. Neither the
//! shared secret nor the derived key outlives the call, and both are zeroized
//! on drop. Nothing is cached.
//!
//! ## Nonces
//! A fresh 96-bit nonce is drawn from the OS CSPRNG for every seal. There is
//! no counter, so nothing needs persisting across restarts.

mod agreement;
mod cipher;
mod kdf;
mod keys;
mod sealed_box;

pub use agreement::{EcdhP256, KeyAgreement, SharedSecret, SHARED_SECRET_SIZE};
pub use cipher::{AeadCipher, Aes256GcmCipher};
pub use kdf::{HkdfSha256, KeyDerivation, SymmetricKey, SYMMETRIC_KEY_SIZE};
pub use keys::{
    KeyError, PublicKey, SecretKey, COMPRESSED_PUBLIC_KEY_SIZE, PRIVATE_KEY_SIZE,
    RAW_PUBLIC_KEY_SIZE, UNCOMPRESSED_PUBLIC_KEY_SIZE,
};
pub use sealed_box::{pack, unpack, SealedBox, MIN_BLOB_SIZE, NONCE_SIZE, TAG_SIZE};
