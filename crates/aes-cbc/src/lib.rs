//! AES-128 in cipher block chaining mode with PKCS#7 padding.
//!
//! ```
//! use aes_cbc::{decrypt, encrypt};
//! use aes_core::Aes128Key;
//!
//! let key = Aes128Key::from([0x42; 16]);
//! let iv = [0x24; 16];
//! let ct = encrypt(b"attack at dawn", &key, &iv);
//! assert_eq!(ct.len(), 16);
//! assert_eq!(decrypt(&ct, &key, &iv).unwrap(), b"attack at dawn");
//! ```
//!
//! CBC provides no integrity. Nothing here authenticates a ciphertext.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cbc;
mod error;
mod padding;

pub use crate::cbc::{decrypt, encrypt, Aes128Cbc, Iv};
pub use crate::error::CbcError;
pub use crate::padding::{pad_pkcs7, unpad_pkcs7};
