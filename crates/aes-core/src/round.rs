//! AES round transformations.

use crate::block::{xor_in_place, Block};
use crate::gf::gmul;
use crate::sbox::{inv_sbox, sbox};

/// Forward MixColumns matrix; row `r` holds the coefficients of output byte `r`.
const MIX: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

/// Inverse of [`MIX`] over GF(2^8).
const INV_MIX: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Performs ShiftRows in place: row `r` rotates left by `r` columns.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let src = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[row + 4 * col] = src[row + 4 * ((col + row) % 4)];
        }
    }
}

/// Performs the inverse of ShiftRows in place: row `r` rotates right by `r`.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    let src = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[row + 4 * ((col + row) % 4)] = src[row + 4 * col];
        }
    }
}

fn mix_single_column(col: &mut [u8; 4], matrix: &[[u8; 4]; 4]) {
    let input = *col;
    for (out, coeffs) in col.iter_mut().zip(matrix.iter()) {
        *out = coeffs
            .iter()
            .zip(input.iter())
            .fold(0, |acc, (&c, &b)| acc ^ gmul(c, b));
    }
}

fn mix_with(state: &mut Block, matrix: &[[u8; 4]; 4]) {
    for chunk in state.chunks_exact_mut(4) {
        let mut column = [chunk[0], chunk[1], chunk[2], chunk[3]];
        mix_single_column(&mut column, matrix);
        chunk.copy_from_slice(&column);
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    mix_with(state, &MIX);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    mix_with(state, &INV_MIX);
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand::RngCore;

    // Round 1 of the FIPS-197 appendix B cipher example.
    const ROUND1_START: Block = hex!("193de3bea0f4e22b9ac68d2ae9f84808");
    const AFTER_SUB_BYTES: Block = hex!("d42711aee0bf98f1b8b45de51e415230");
    const AFTER_SHIFT_ROWS: Block = hex!("d4bf5d30e0b452aeb84111f11e2798e5");
    const AFTER_MIX_COLUMNS: Block = hex!("046681e5e0cb199a48f8d37a2806264c");
    const ROUND1_KEY: Block = hex!("a0fafe1788542cb123a339392a6c7605");
    const ROUND2_START: Block = hex!("a49c7ff2689f352b6b5bea43026a5049");

    #[test]
    fn round_one_matches_fips_197() {
        let mut state = ROUND1_START;
        sub_bytes(&mut state);
        assert_eq!(state, AFTER_SUB_BYTES);
        shift_rows(&mut state);
        assert_eq!(state, AFTER_SHIFT_ROWS);
        mix_columns(&mut state);
        assert_eq!(state, AFTER_MIX_COLUMNS);
        add_round_key(&mut state, &ROUND1_KEY);
        assert_eq!(state, ROUND2_START);
    }

    #[test]
    fn inverse_steps_undo_round_one() {
        let mut state = ROUND2_START;
        add_round_key(&mut state, &ROUND1_KEY);
        inv_mix_columns(&mut state);
        assert_eq!(state, AFTER_SHIFT_ROWS);
        inv_shift_rows(&mut state);
        assert_eq!(state, AFTER_SUB_BYTES);
        inv_sub_bytes(&mut state);
        assert_eq!(state, ROUND1_START);
    }

    #[test]
    fn mix_single_column_known_answer() {
        let mut col = [0xdb, 0x13, 0x53, 0x45];
        mix_single_column(&mut col, &MIX);
        assert_eq!(col, [0x8e, 0x4d, 0xa1, 0xbc]);
        mix_single_column(&mut col, &INV_MIX);
        assert_eq!(col, [0xdb, 0x13, 0x53, 0x45]);
    }

    #[test]
    fn shift_rows_leaves_row_zero_in_place() {
        let mut state: Block = core::array::from_fn(|i| i as u8);
        shift_rows(&mut state);
        assert_eq!([state[0], state[4], state[8], state[12]], [0, 4, 8, 12]);
        assert_eq!([state[1], state[5], state[9], state[13]], [5, 9, 13, 1]);
        assert_eq!([state[3], state[7], state[11], state[15]], [15, 3, 7, 11]);
    }

    #[test]
    fn transforms_invert_on_random_states() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let mut original = [0u8; 16];
            rng.fill_bytes(&mut original);

            let mut state = original;
            mix_columns(&mut state);
            inv_mix_columns(&mut state);
            assert_eq!(state, original);

            shift_rows(&mut state);
            inv_shift_rows(&mut state);
            assert_eq!(state, original);

            sub_bytes(&mut state);
            inv_sub_bytes(&mut state);
            assert_eq!(state, original);

            let mut key = [0u8; 16];
            rng.fill_bytes(&mut key);
            add_round_key(&mut state, &key);
            add_round_key(&mut state, &key);
            assert_eq!(state, original);
        }
    }
}
