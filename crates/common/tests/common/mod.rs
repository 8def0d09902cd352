//! Shared fixtures for envelope integration tests
#![allow(dead_code)]

use common::crypto::SecretKey;

pub const TEST_SALT: &str = "test-salt";

const KEY_A_HEX: &str = "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721";
const KEY_B_HEX: &str = "7d7dc5f71eb29ddaf80d6214632eeae03d9058af1fb6d22ed80badb62bc1a534";
const KEY_C_HEX: &str = "3fd2f5b0a2e1c8d7b6a5948372615f4e3d2c1b0a99887766554433221100ffee";

/// Fixed key pair A (the usual sender)
pub fn key_a() -> SecretKey {
    SecretKey::from_hex(KEY_A_HEX).unwrap()
}

/// Fixed key pair B (the usual recipient)
pub fn key_b() -> SecretKey {
    SecretKey::from_hex(KEY_B_HEX).unwrap()
}

/// Fixed key pair C, unrelated to the A/B conversation
pub fn key_c() -> SecretKey {
    SecretKey::from_hex(KEY_C_HEX).unwrap()
}

/// Flip a single bit of `data`
pub fn flip_bit(data: &[u8], bit: usize) -> Vec<u8> {
    let mut out = data.to_vec();
    out[bit / 8] ^= 1 << (bit % 8);
    out
}
