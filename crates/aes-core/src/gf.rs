//! Arithmetic in GF(2^8) modulo `x^8 + x^4 + x^3 + x + 1`.

/// Low byte of the AES reduction polynomial `0x11b`.
const REDUCTION: u8 = 0x1b;

/// Multiplies a field element by `x`.
#[inline]
pub fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ REDUCTION
    } else {
        shifted
    }
}

/// Multiplies two field elements.
pub fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    for _ in 0..8 {
        if b & 1 != 0 {
            product ^= a;
        }
        let hi_bit_set = a & 0x80;
        a <<= 1;
        if hi_bit_set != 0 {
            a ^= REDUCTION;
        }
        b >>= 1;
    }
    product
}
