//! AES-128 key schedule and block encryption/decryption.

use crate::block::Block;
use crate::key::{Aes128Key, RoundKeys, ROUND_KEY_COUNT};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;
use crate::trace::{Direction, NoTrace, Step, Trace};

/// Number of full rounds for AES-128.
pub const ROUNDS: usize = 10;

/// Round constants indexed by `i / 4`; entry 0 is never used.
const RCON: [u8; 11] = [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

const WORDS: usize = 4 * ROUND_KEY_COUNT;

type Word = [u8; 4];

fn rot_word(word: Word) -> Word {
    [word[1], word[2], word[3], word[0]]
}

fn sub_word(word: Word) -> Word {
    word.map(sbox)
}

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    let mut w = [[0u8; 4]; WORDS];
    for (word, chunk) in w.iter_mut().zip(key.0.chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in 4..WORDS {
        let mut temp = w[i - 1];
        if i % 4 == 0 {
            temp = sub_word(rot_word(temp));
            temp[0] ^= RCON[i / 4];
        }
        let prev = w[i - 4];
        w[i] = core::array::from_fn(|j| prev[j] ^ temp[j]);
    }

    let mut round_keys = [[0u8; 16]; ROUND_KEY_COUNT];
    for (round_key, words) in round_keys.iter_mut().zip(w.chunks_exact(4)) {
        for (dst, word) in round_key.chunks_exact_mut(4).zip(words.iter()) {
            dst.copy_from_slice(word);
        }
    }

    RoundKeys(round_keys)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    encrypt_block_traced(block, round_keys, &mut NoTrace)
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    decrypt_block_traced(block, round_keys, &mut NoTrace)
}

/// Like [`encrypt_block`], reporting every intermediate state to `trace`.
pub fn encrypt_block_traced<T: Trace + ?Sized>(
    block: &Block,
    round_keys: &RoundKeys,
    trace: &mut T,
) -> Block {
    let mut state = *block;
    trace.state(Step::Input, 0, &state);

    apply_round_key(&mut state, round_keys, 0, Direction::Encrypt, trace);

    for round in 1..ROUNDS {
        sub_bytes(&mut state);
        trace.state(Step::SubBytes, round, &state);
        shift_rows(&mut state);
        trace.state(Step::ShiftRows, round, &state);
        mix_columns(&mut state);
        trace.state(Step::MixColumns, round, &state);
        apply_round_key(&mut state, round_keys, round, Direction::Encrypt, trace);
    }

    // Final round has no MixColumns.
    sub_bytes(&mut state);
    trace.state(Step::SubBytes, ROUNDS, &state);
    shift_rows(&mut state);
    trace.state(Step::ShiftRows, ROUNDS, &state);
    apply_round_key(&mut state, round_keys, ROUNDS, Direction::Encrypt, trace);

    state
}

/// Like [`decrypt_block`], reporting every intermediate state to `trace`.
pub fn decrypt_block_traced<T: Trace + ?Sized>(
    block: &Block,
    round_keys: &RoundKeys,
    trace: &mut T,
) -> Block {
    let mut state = *block;
    trace.state(Step::Input, ROUNDS, &state);

    apply_round_key(&mut state, round_keys, ROUNDS, Direction::Decrypt, trace);
    inv_shift_rows(&mut state);
    trace.state(Step::InvShiftRows, ROUNDS, &state);
    inv_sub_bytes(&mut state);
    trace.state(Step::InvSubBytes, ROUNDS, &state);

    for round in (1..ROUNDS).rev() {
        apply_round_key(&mut state, round_keys, round, Direction::Decrypt, trace);
        inv_mix_columns(&mut state);
        trace.state(Step::InvMixColumns, round, &state);
        inv_shift_rows(&mut state);
        trace.state(Step::InvShiftRows, round, &state);
        inv_sub_bytes(&mut state);
        trace.state(Step::InvSubBytes, round, &state);
    }

    apply_round_key(&mut state, round_keys, 0, Direction::Decrypt, trace);

    state
}

fn apply_round_key<T: Trace + ?Sized>(
    state: &mut Block,
    round_keys: &RoundKeys,
    round: usize,
    direction: Direction,
    trace: &mut T,
) {
    let key = round_keys.get(round);
    add_round_key(state, key);
    trace.state(Step::AddRoundKey, round, state);
    trace.round_key(round, key, direction);
}
