//! Key types for AES-128.

use crate::block::{Block, BLOCK_SIZE};

/// Number of round keys produced by the AES-128 schedule.
pub const ROUND_KEY_COUNT: usize = 11;

/// Length of the flattened key schedule in bytes.
pub const EXPANDED_KEY_LEN: usize = ROUND_KEY_COUNT * BLOCK_SIZE;

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; 16]);

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

/// Expanded round keys for AES-128.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [Block; ROUND_KEY_COUNT]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Returns the schedule as one contiguous 176-byte array.
    pub fn to_bytes(&self) -> [u8; EXPANDED_KEY_LEN] {
        let mut out = [0u8; EXPANDED_KEY_LEN];
        for (chunk, round_key) in out.chunks_exact_mut(BLOCK_SIZE).zip(self.0.iter()) {
            chunk.copy_from_slice(round_key);
        }
        out
    }
}
