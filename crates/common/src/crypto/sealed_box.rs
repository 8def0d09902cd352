//! Combined-box framing
//!
//! A sealed message travels as one contiguous blob:
//!
//! ```text
//! [ nonce: 12 bytes ][ ciphertext: N bytes ][ tag: 16 bytes ]
//! ```
//!
//! There is no version byte or algorithm identifier. Both ends agree on the
//! cipher out of band, so the nonce and tag sizes are fixed constants and the
//! ciphertext is whatever sits between them.

use serde::{Deserialize, Serialize};

use crate::error::SealError;

/// Size of the AEAD nonce in bytes
pub const NONCE_SIZE: usize = 12;
/// Size of the AEAD authentication tag in bytes
pub const TAG_SIZE: usize = 16;
/// Smallest well-formed blob: an empty plaintext still carries nonce and tag
pub const MIN_BLOB_SIZE: usize = NONCE_SIZE + TAG_SIZE;

/// Output of an AEAD seal: nonce, ciphertext and tag kept apart
///
/// The ciphertext is exactly as long as the plaintext it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedBox {
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_SIZE],
}

impl SealedBox {
    /// Length of the packed representation
    pub fn len(&self) -> usize {
        NONCE_SIZE + self.ciphertext.len() + TAG_SIZE
    }

    /// Whether the box carries an empty plaintext
    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }

    /// Concatenate into `nonce || ciphertext || tag`
    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Split a combined blob back into its parts
    ///
    /// # Errors
    ///
    /// Returns [`SealError::MalformedBlob`] if the blob is shorter than
    /// [`MIN_BLOB_SIZE`]. Nothing is decrypted here; a structurally valid
    /// blob may still fail authentication later.
    pub fn unpack(blob: &[u8]) -> Result<Self, SealError> {
        if blob.len() < MIN_BLOB_SIZE {
            return Err(SealError::MalformedBlob(format!(
                "blob too short, expected at least {}, got {}",
                MIN_BLOB_SIZE,
                blob.len()
            )));
        }

        let (nonce, rest) = blob.split_at(NONCE_SIZE);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_SIZE);

        let mut sealed = SealedBox {
            nonce: [0; NONCE_SIZE],
            ciphertext: ciphertext.to_vec(),
            tag: [0; TAG_SIZE],
        };
        sealed.nonce.copy_from_slice(nonce);
        sealed.tag.copy_from_slice(tag);
        Ok(sealed)
    }
}

/// Free-function form of [`SealedBox::pack`]
pub fn pack(sealed: &SealedBox) -> Vec<u8> {
    sealed.pack()
}

/// Free-function form of [`SealedBox::unpack`]
pub fn unpack(blob: &[u8]) -> Result<SealedBox, SealError> {
    SealedBox::unpack(blob)
}

impl TryFrom<&[u8]> for SealedBox {
    type Error = SealError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        SealedBox::unpack(bytes)
    }
}

impl From<&SealedBox> for Vec<u8> {
    fn from(sealed: &SealedBox) -> Self {
        sealed.pack()
    }
}

impl Serialize for SealedBox {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.pack())
    }
}

impl<'de> Deserialize<'de> for SealedBox {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error, Visitor};
        use std::fmt;

        struct SealedBoxVisitor;

        impl<'de> Visitor<'de> for SealedBoxVisitor {
            type Value = SealedBox;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a byte array or sequence of at least {} bytes",
                    MIN_BLOB_SIZE
                )
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: Error,
            {
                SealedBox::unpack(v).map_err(|_| {
                    E::invalid_length(
                        v.len(),
                        &format!("at least {} bytes", MIN_BLOB_SIZE).as_str(),
                    )
                })
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = Vec::new();
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                self.visit_bytes(&bytes)
            }
        }

        // bytes for bincode, seq for JSON
        deserializer.deserialize_byte_buf(SealedBoxVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> SealedBox {
        SealedBox {
            nonce: [1u8; NONCE_SIZE],
            ciphertext: b"hello".to_vec(),
            tag: [2u8; TAG_SIZE],
        }
    }

    #[test]
    fn test_pack_layout() {
        let blob = sample().pack();
        assert_eq!(blob.len(), NONCE_SIZE + 5 + TAG_SIZE);
        assert_eq!(&blob[..NONCE_SIZE], &[1u8; NONCE_SIZE]);
        assert_eq!(&blob[NONCE_SIZE..NONCE_SIZE + 5], b"hello");
        assert_eq!(&blob[NONCE_SIZE + 5..], &[2u8; TAG_SIZE]);
    }

    #[test]
    fn test_unpack_splits_at_fixed_offsets() {
        let sealed = sample();
        assert_eq!(unpack(&pack(&sealed)).unwrap(), sealed);
    }

    #[test]
    fn test_unpack_minimum_size() {
        let blob = [9u8; MIN_BLOB_SIZE];
        let sealed = SealedBox::unpack(&blob).unwrap();
        assert!(sealed.is_empty());
        assert_eq!(sealed.len(), MIN_BLOB_SIZE);
    }

    #[test]
    fn test_unpack_too_short() {
        for len in [0, 1, NONCE_SIZE, TAG_SIZE, MIN_BLOB_SIZE - 1] {
            let blob = vec![0u8; len];
            assert!(matches!(
                SealedBox::try_from(blob.as_slice()),
                Err(SealError::MalformedBlob(_))
            ));
        }
    }

    #[test]
    fn test_sealed_box_serde_formats() {
        let sealed = sample();

        let json = serde_json::to_string(&sealed).unwrap();
        let json_box: SealedBox = serde_json::from_str(&json).unwrap();
        assert_eq!(sealed, json_box);

        let binary = bincode::serialize(&sealed).unwrap();
        let binary_box: SealedBox = bincode::deserialize(&binary).unwrap();
        assert_eq!(sealed, binary_box);
    }

    #[test]
    fn test_sealed_box_deserialize_too_short() {
        let short = vec![0u8; MIN_BLOB_SIZE - 1];
        let result: Result<SealedBox, _> =
            bincode::deserialize(&bincode::serialize(&short).unwrap());
        assert!(result.is_err());
    }
}
