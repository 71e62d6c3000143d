//! PKCS#7 padding for 16-byte blocks.

use aes_core::BLOCK_SIZE;

use crate::CbcError;

/// Appends `n` bytes of value `n`, with `1 <= n <= 16`, so the result is
/// block aligned. Aligned input gains a full block.
pub fn pad_pkcs7(data: &[u8]) -> Vec<u8> {
    let pad = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Strips PKCS#7 padding, checking every padding byte.
///
/// Rejects an empty buffer, a count of zero, a count above the block size or
/// the buffer length, and any trailing byte that does not repeat the count.
pub fn unpad_pkcs7(data: &[u8]) -> Result<&[u8], CbcError> {
    let &last = data.last().ok_or(CbcError::Padding)?;
    let pad = last as usize;
    if pad == 0 || pad > BLOCK_SIZE || pad > data.len() {
        return Err(CbcError::Padding);
    }
    let (body, tail) = data.split_at(data.len() - pad);
    // Fold the comparison so every padding byte is inspected.
    let mismatch = tail.iter().fold(0u8, |acc, &b| acc | (b ^ last));
    if mismatch != 0 {
        return Err(CbcError::Padding);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_unpad_all_short_lengths() {
        for len in 0..32usize {
            let data: Vec<u8> = (0..len as u8).collect();
            let padded = pad_pkcs7(&data);
            assert_eq!(padded.len() % BLOCK_SIZE, 0);
            let added = padded.len() - len;
            assert!((1..=BLOCK_SIZE).contains(&added), "len {len} added {added}");
            assert!(padded[len..].iter().all(|&b| b as usize == added));
            assert_eq!(unpad_pkcs7(&padded).unwrap(), &data[..]);
        }
    }

    #[test]
    fn aligned_input_gets_a_full_block() {
        let padded = pad_pkcs7(&[0xaa; 16]);
        assert_eq!(padded.len(), 32);
        assert_eq!(&padded[16..], &[16u8; 16]);
        assert!(pad_pkcs7(&[]).iter().all(|&b| b == 16));
    }

    #[test]
    fn rejects_malformed_padding() {
        assert_eq!(unpad_pkcs7(&[]), Err(CbcError::Padding));

        let mut block = [4u8; 16];
        block[15] = 0;
        assert_eq!(unpad_pkcs7(&block), Err(CbcError::Padding));

        block[15] = 17;
        assert_eq!(unpad_pkcs7(&block), Err(CbcError::Padding));

        // count larger than the buffer
        assert_eq!(unpad_pkcs7(&[1, 2, 5]), Err(CbcError::Padding));

        // inconsistent trailing bytes
        let mut block = [3u8; 16];
        block[13] = 7;
        assert_eq!(unpad_pkcs7(&block), Err(CbcError::Padding));
    }

    #[test]
    fn whole_buffer_of_padding_yields_empty() {
        assert_eq!(unpad_pkcs7(&[16u8; 16]).unwrap(), &[] as &[u8]);
    }
}
