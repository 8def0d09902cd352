use std::fmt;

use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::FieldBytes;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::SealError;

/// Size of a P-256 private scalar in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;
/// Size of a SEC1 compressed P-256 point in bytes
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;
/// Size of a SEC1 uncompressed P-256 point in bytes (`0x04 || x || y`)
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;
/// Size of a raw `x || y` P-256 point in bytes, without the SEC1 tag
pub const RAW_PUBLIC_KEY_SIZE: usize = 64;

const PRIVATE_KEY_PEM_TAG: &str = "P256 PRIVATE KEY";
const PUBLIC_KEY_PEM_TAG: &str = "P256 PUBLIC KEY";
const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

/// Errors that can occur while parsing key material
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("invalid key size, expected {expected}, got {actual}")]
    InvalidSize { expected: usize, actual: usize },
    #[error("private scalar is zero or out of range")]
    InvalidScalar,
    #[error("public key is not a valid curve point")]
    InvalidPoint,
    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("PEM error: {0}")]
    Pem(String),
}

/// Public half of a P-256 key agreement key pair
///
/// Construction always validates the encoding: the point must lie on the
/// curve and must not be the identity. Freely shareable.
///
/// # Examples
///
/// ```ignore
/// let secret_key = SecretKey::generate()?;
/// let public_key = secret_key.public();
///
/// // Hex of the compressed SEC1 encoding, suitable for exchanging out of band
/// let hex = public_key.to_hex();
/// let recovered = PublicKey::from_hex(&hex)?;
/// assert_eq!(public_key, recovered);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(p256::PublicKey);

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

impl From<p256::PublicKey> for PublicKey {
    fn from(key: p256::PublicKey) -> Self {
        PublicKey(key)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl PublicKey {
    /// Parse a public key from its byte encoding
    ///
    /// Accepts SEC1 compressed (33 bytes, tag `0x02`/`0x03`), SEC1
    /// uncompressed (65 bytes, tag `0x04`) and the raw `x || y` form
    /// (64 bytes) some platforms export.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidPoint`] for any encoding that does not
    /// decode to a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let key = match bytes.len() {
            RAW_PUBLIC_KEY_SIZE => {
                let mut sec1 = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
                sec1[0] = SEC1_UNCOMPRESSED_TAG;
                sec1[1..].copy_from_slice(bytes);
                p256::PublicKey::from_sec1_bytes(&sec1)
            }
            // SEC1 compact (0x05) and hybrid (0x06, 0x07) tags are rejected
            COMPRESSED_PUBLIC_KEY_SIZE if matches!(bytes[0], 0x02 | 0x03) => {
                p256::PublicKey::from_sec1_bytes(bytes)
            }
            UNCOMPRESSED_PUBLIC_KEY_SIZE if bytes[0] == SEC1_UNCOMPRESSED_TAG => {
                p256::PublicKey::from_sec1_bytes(bytes)
            }
            COMPRESSED_PUBLIC_KEY_SIZE | UNCOMPRESSED_PUBLIC_KEY_SIZE => {
                return Err(KeyError::InvalidPoint)
            }
            actual => {
                return Err(KeyError::InvalidSize {
                    expected: COMPRESSED_PUBLIC_KEY_SIZE,
                    actual,
                })
            }
        };
        key.map(PublicKey).map_err(|_| KeyError::InvalidPoint)
    }

    /// Parse a public key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes = hex::decode(hex)?;
        Self::from_bytes(&bytes)
    }

    /// Compressed SEC1 encoding
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Uncompressed SEC1 encoding (`0x04 || x || y`)
    pub fn to_uncompressed_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(false).as_bytes().to_vec()
    }

    /// Hex of the compressed SEC1 encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_sec1_bytes())
    }

    pub fn to_pem(&self) -> String {
        pem::encode(&pem::Pem::new(PUBLIC_KEY_PEM_TAG, self.to_sec1_bytes()))
    }

    pub fn from_pem(pem_str: &str) -> Result<Self, KeyError> {
        let pem = parse_pem(pem_str, PUBLIC_KEY_PEM_TAG)?;
        Self::from_bytes(pem.contents())
    }

    pub(crate) fn as_inner(&self) -> &p256::PublicKey {
        &self.0
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        PublicKey::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Private half of a P-256 key agreement key pair
///
/// Exclusively owned by its holder. The scalar is zeroized when the key is
/// dropped and never appears in `Debug` output. Persisting it is up to the
/// caller; [`SecretKey::to_pem`] and [`SecretKey::from_pem`] are provided for
/// that.
///
/// # Examples
///
/// ```ignore
/// let secret_key = SecretKey::generate()?;
///
/// let pem = secret_key.to_pem();
/// std::fs::write("key.pem", pem.as_str())?;
///
/// let pem = std::fs::read_to_string("key.pem")?;
/// let recovered = SecretKey::from_pem(&pem)?;
/// ```
#[derive(Clone)]
pub struct SecretKey(p256::SecretKey);

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("public", &self.public())
            .finish_non_exhaustive()
    }
}

impl SecretKey {
    /// Parse a secret key from a 32-byte big-endian scalar
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not exactly [`PRIVATE_KEY_SIZE`] bytes
    /// or the scalar is zero or not below the group order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(KeyError::InvalidSize {
                expected: PRIVATE_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        p256::SecretKey::from_bytes(FieldBytes::from_slice(bytes))
            .map(SecretKey)
            .map_err(|_| KeyError::InvalidScalar)
    }

    /// Parse a secret key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut buff = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        hex::decode_to_slice(hex, &mut buff[..])?;
        Self::from_bytes(&buff[..])
    }

    /// Generate a new random secret key from the OS CSPRNG
    ///
    /// # Errors
    ///
    /// Returns [`SealError::RandomnessUnavailable`] if the OS source fails.
    /// There is no fallback to a weaker source.
    pub fn generate() -> Result<Self, SealError> {
        loop {
            let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
            getrandom::getrandom(&mut bytes[..])?;
            // rejection sampling, out of range scalars are astronomically rare
            if let Ok(key) = Self::from_bytes(&bytes[..]) {
                return Ok(key);
            }
        }
    }

    /// Derive the public key from this secret key
    pub fn public(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        out.copy_from_slice(&self.0.to_bytes());
        out
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.to_bytes()[..]))
    }

    /// Encode secret key in PEM format for storage
    ///
    /// Returns a PEM-encoded string with tag "P256 PRIVATE KEY".
    pub fn to_pem(&self) -> Zeroizing<String> {
        let pem = pem::Pem::new(PRIVATE_KEY_PEM_TAG, self.to_bytes().to_vec());
        Zeroizing::new(pem::encode(&pem))
    }

    /// Parse a secret key from PEM format
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The PEM string is malformed
    /// - The PEM tag is not "P256 PRIVATE KEY"
    /// - The key size is incorrect or the scalar is out of range
    pub fn from_pem(pem_str: &str) -> Result<Self, KeyError> {
        let pem = parse_pem(pem_str, PRIVATE_KEY_PEM_TAG)?;
        Self::from_bytes(pem.contents())
    }

    pub(crate) fn as_inner(&self) -> &p256::SecretKey {
        &self.0
    }
}

fn parse_pem(pem_str: &str, expected_tag: &str) -> Result<pem::Pem, KeyError> {
    let pem = pem::parse(pem_str).map_err(|e| KeyError::Pem(e.to_string()))?;
    if pem.tag() != expected_tag {
        return Err(KeyError::Pem(format!(
            "invalid PEM tag, expected {}, got {}",
            expected_tag,
            pem.tag()
        )));
    }
    Ok(pem)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keypair_hex_roundtrip() {
        let private_key = SecretKey::generate().unwrap();
        let public_key = private_key.public();

        let recovered_private = SecretKey::from_hex(&private_key.to_hex()).unwrap();
        assert_eq!(*private_key.to_bytes(), *recovered_private.to_bytes());

        let recovered_public = PublicKey::from_hex(&public_key.to_hex()).unwrap();
        assert_eq!(public_key, recovered_public);
    }

    #[test]
    fn test_pem_serialization() {
        let private_key = SecretKey::generate().unwrap();

        let pem = private_key.to_pem();
        let recovered_private = SecretKey::from_pem(&pem).unwrap();
        assert_eq!(private_key.public(), recovered_private.public());

        let public_pem = private_key.public().to_pem();
        assert_eq!(
            PublicKey::from_pem(&public_pem).unwrap(),
            private_key.public()
        );

        // a public key PEM is not a private key
        assert!(matches!(
            SecretKey::from_pem(&public_pem),
            Err(KeyError::Pem(_))
        ));
    }

    #[test]
    fn test_public_key_encodings() {
        let public_key = SecretKey::generate().unwrap().public();

        let compressed = public_key.to_sec1_bytes();
        let uncompressed = public_key.to_uncompressed_bytes();
        assert_eq!(compressed.len(), COMPRESSED_PUBLIC_KEY_SIZE);
        assert_eq!(uncompressed.len(), UNCOMPRESSED_PUBLIC_KEY_SIZE);

        assert_eq!(PublicKey::from_bytes(&compressed).unwrap(), public_key);
        assert_eq!(PublicKey::from_bytes(&uncompressed).unwrap(), public_key);
        assert_eq!(PublicKey::from_bytes(&uncompressed[1..]).unwrap(), public_key);
    }

    #[test]
    fn test_invalid_point_rejected() {
        // x = 2^256 - 1 is not a field element
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
        bytes[0] = 0x02;
        bytes[1..].copy_from_slice(&[0xFF; 32]);
        assert!(matches!(
            PublicKey::from_bytes(&bytes),
            Err(KeyError::InvalidPoint)
        ));

        let off_curve = [0x04; UNCOMPRESSED_PUBLIC_KEY_SIZE];
        assert!(matches!(
            PublicKey::from_bytes(&off_curve),
            Err(KeyError::InvalidPoint)
        ));

        assert!(matches!(
            PublicKey::from_bytes(&[0x02; 10]),
            Err(KeyError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_only_compressed_and_uncompressed_tags_accepted() {
        let public_key = SecretKey::generate().unwrap().public();
        let compressed = public_key.to_sec1_bytes();

        // same x coordinate under the SEC1 compact tag
        let mut compact = compressed.clone();
        compact[0] = 0x05;
        assert!(matches!(
            PublicKey::from_bytes(&compact),
            Err(KeyError::InvalidPoint)
        ));
        assert!(matches!(
            PublicKey::from_hex(&hex::encode(&compact)),
            Err(KeyError::InvalidPoint)
        ));

        let mut hybrid = public_key.to_uncompressed_bytes();
        hybrid[0] = 0x06;
        assert!(matches!(
            PublicKey::from_bytes(&hybrid),
            Err(KeyError::InvalidPoint)
        ));
    }

    #[test]
    fn test_invalid_scalar_rejected() {
        assert!(matches!(
            SecretKey::from_bytes(&[0u8; PRIVATE_KEY_SIZE]),
            Err(KeyError::InvalidScalar)
        ));
        // above the group order
        assert!(matches!(
            SecretKey::from_bytes(&[0xFF; PRIVATE_KEY_SIZE]),
            Err(KeyError::InvalidScalar)
        ));
        assert!(matches!(
            SecretKey::from_bytes(&[1u8; 16]),
            Err(KeyError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let private_key = SecretKey::generate().unwrap();
        let debug = format!("{:?}", private_key);
        assert!(!debug.contains(private_key.to_hex().as_str()));
    }

    #[test]
    fn test_public_key_serde_json_roundtrip() {
        let public_key = SecretKey::generate().unwrap().public();
        let json = serde_json::to_string(&public_key).unwrap();
        assert_eq!(json, format!("\"{}\"", public_key.to_hex()));
        let recovered: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(public_key, recovered);
    }
}
