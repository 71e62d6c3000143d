//! Block representation helpers.

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes, stored column-major (`row + 4 * col`).
pub type Block = [u8; BLOCK_SIZE];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
