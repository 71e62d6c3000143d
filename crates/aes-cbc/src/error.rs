/// Errors produced while decrypting a CBC message.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbcError {
    /// Ciphertext is empty or not block aligned. Nothing was decrypted.
    #[error("ciphertext length {len} is not a positive multiple of {}", aes_core::BLOCK_SIZE)]
    InvalidLength {
        /// Length of the rejected ciphertext.
        len: usize,
    },

    /// Decrypted data does not end in valid PKCS#7 padding.
    #[error("malformed PKCS#7 padding")]
    Padding,
}
