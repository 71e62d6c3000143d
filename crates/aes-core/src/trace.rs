//! Observer hook for intermediate cipher states.
//!
//! The cipher functions report every transformation to a [`Trace`]
//! implementation. All methods default to doing nothing, so callers only
//! override what they want to see. [`NoTrace`] is the zero-cost default used by
//! the untraced entry points.

use core::fmt;

use crate::block::Block;
use crate::key::RoundKeys;

/// Which way data is flowing through the cipher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => f.write_str("Encryption"),
            Direction::Decrypt => f.write_str("Decryption"),
        }
    }
}

/// A single step of the round function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// State as handed to the block function, before any transformation.
    Input,
    /// After `SubBytes`.
    SubBytes,
    /// After `ShiftRows`.
    ShiftRows,
    /// After `MixColumns`.
    MixColumns,
    /// After `AddRoundKey`.
    AddRoundKey,
    /// After `InvSubBytes`.
    InvSubBytes,
    /// After `InvShiftRows`.
    InvShiftRows,
    /// After `InvMixColumns`.
    InvMixColumns,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Input => "Input",
            Step::SubBytes => "SubBytes",
            Step::ShiftRows => "ShiftRows",
            Step::MixColumns => "MixColumns",
            Step::AddRoundKey => "AddRoundKey",
            Step::InvSubBytes => "InvSubBytes",
            Step::InvShiftRows => "InvShiftRows",
            Step::InvMixColumns => "InvMixColumns",
        };
        f.write_str(name)
    }
}

/// Receives intermediate values while a block or message is processed.
pub trait Trace {
    /// Called after each transformation with the updated state.
    fn state(&mut self, _step: Step, _round: usize, _state: &Block) {}

    /// Called whenever a round key is mixed into the state.
    fn round_key(&mut self, _round: usize, _key: &Block, _direction: Direction) {}

    /// Called once per message with the full key schedule.
    fn key_schedule(&mut self, _round_keys: &RoundKeys) {}

    /// Called by chaining modes with block `index` after it was combined
    /// with the previous ciphertext block (or IV).
    fn chained(&mut self, _index: usize, _direction: Direction, _block: &Block) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl Trace for NoTrace {}

impl<T: Trace + ?Sized> Trace for &mut T {
    fn state(&mut self, step: Step, round: usize, state: &Block) {
        (**self).state(step, round, state);
    }

    fn round_key(&mut self, round: usize, key: &Block, direction: Direction) {
        (**self).round_key(round, key, direction);
    }

    fn key_schedule(&mut self, round_keys: &RoundKeys) {
        (**self).key_schedule(round_keys);
    }

    fn chained(&mut self, index: usize, direction: Direction, block: &Block) {
        (**self).chained(index, direction, block);
    }
}
