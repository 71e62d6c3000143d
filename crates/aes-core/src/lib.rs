//! Reference AES-128 block cipher.
//!
//! This crate follows FIPS-197 and provides:
//! - GF(2^8) arithmetic and the forward/inverse S-boxes.
//! - Key schedule for AES-128.
//! - The four round transformations and their inverses.
//! - Single-block encryption and decryption, optionally observed through a
//!   [`Trace`] hook.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; S-box lookups are table-indexed and it should not be treated as
//! side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod gf;
mod key;
mod round;
mod sbox;
mod trace;

pub use crate::block::{xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{
    decrypt_block, decrypt_block_traced, encrypt_block, encrypt_block_traced, expand_key, ROUNDS,
};
pub use crate::gf::{gmul, xtime};
pub use crate::key::{Aes128Key, RoundKeys, EXPANDED_KEY_LEN, ROUND_KEY_COUNT};
pub use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, SBOX};
pub use crate::trace::{Direction, NoTrace, Step, Trace};
