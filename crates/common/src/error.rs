use crate::crypto::KeyError;

/// Errors surfaced by the sealing protocol
///
/// No variant carries key material, shared secrets or plaintext.
/// `AuthenticationFailed` does not say whether the key, the salt or the
/// blob was wrong.
#[derive(Debug, thiserror::Error)]
pub enum SealError {
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),
    #[error("key derivation failed")]
    DerivationFailed,
    #[error("plaintext of {0} bytes exceeds the cipher limit")]
    PlaintextTooLong(usize),
    #[error("malformed blob: {0}")]
    MalformedBlob(String),
    #[error("authentication failed")]
    AuthenticationFailed,
    #[error("decrypted bytes are not valid UTF-8")]
    DecodedTextInvalid(#[source] std::string::FromUtf8Error),
    #[error("secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),
}

impl From<base64::DecodeError> for SealError {
    fn from(e: base64::DecodeError) -> Self {
        SealError::MalformedBlob(format!("base64 decode error: {}", e))
    }
}

impl From<getrandom::Error> for SealError {
    fn from(e: getrandom::Error) -> Self {
        SealError::RandomnessUnavailable(e.to_string())
    }
}
