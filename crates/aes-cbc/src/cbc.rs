//! Cipher block chaining over AES-128.

use aes_core::{
    decrypt_block_traced, encrypt_block_traced, expand_key, xor_in_place, Aes128Key, Block,
    Direction, NoTrace, RoundKeys, Trace, BLOCK_SIZE,
};

use crate::padding::{pad_pkcs7, unpad_pkcs7};
use crate::CbcError;

/// Initialization vector: the virtual ciphertext block preceding block 0.
pub type Iv = Block;

/// An AES-128-CBC session bound to one key and IV.
///
/// The key schedule is derived once in [`Aes128Cbc::new`] and reused for
/// every message. The session itself is immutable, so it can be shared
/// between threads; each call keeps its chaining state on the stack.
#[derive(Clone, Debug)]
pub struct Aes128Cbc {
    round_keys: RoundKeys,
    iv: Iv,
}

impl Aes128Cbc {
    /// Expands `key` and binds it to `iv`.
    pub fn new(key: &Aes128Key, iv: &Iv) -> Self {
        Self {
            round_keys: expand_key(key),
            iv: *iv,
        }
    }

    /// Returns the expanded key schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Returns the IV this session chains from.
    pub fn iv(&self) -> &Iv {
        &self.iv
    }

    /// Pads and encrypts `plaintext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        self.encrypt_traced(plaintext, &mut NoTrace)
    }

    /// Decrypts `ciphertext` and strips its padding.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CbcError> {
        self.decrypt_traced(ciphertext, &mut NoTrace)
    }

    /// Like [`Aes128Cbc::encrypt`], reporting intermediate values to `trace`.
    pub fn encrypt_traced<T: Trace + ?Sized>(&self, plaintext: &[u8], trace: &mut T) -> Vec<u8> {
        let mut data = pad_pkcs7(plaintext);
        trace.key_schedule(&self.round_keys);

        let mut prev = self.iv;
        for (index, chunk) in data.chunks_exact_mut(BLOCK_SIZE).enumerate() {
            let mut block = to_block(chunk);
            xor_in_place(&mut block, &prev);
            trace.chained(index, Direction::Encrypt, &block);
            prev = encrypt_block_traced(&block, &self.round_keys, trace);
            chunk.copy_from_slice(&prev);
        }
        data
    }

    /// Like [`Aes128Cbc::decrypt`], reporting intermediate values to `trace`.
    pub fn decrypt_traced<T: Trace + ?Sized>(
        &self,
        ciphertext: &[u8],
        trace: &mut T,
    ) -> Result<Vec<u8>, CbcError> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CbcError::InvalidLength {
                len: ciphertext.len(),
            });
        }
        trace.key_schedule(&self.round_keys);

        let mut plaintext = Vec::with_capacity(ciphertext.len());
        let mut prev = self.iv;
        for (index, chunk) in ciphertext.chunks_exact(BLOCK_SIZE).enumerate() {
            let current = to_block(chunk);
            let mut block = decrypt_block_traced(&current, &self.round_keys, trace);
            xor_in_place(&mut block, &prev);
            trace.chained(index, Direction::Decrypt, &block);
            plaintext.extend_from_slice(&block);
            prev = current;
        }

        let len = unpad_pkcs7(&plaintext)?.len();
        plaintext.truncate(len);
        Ok(plaintext)
    }
}

/// Encrypts `plaintext` under `key` and `iv` with PKCS#7 padding.
pub fn encrypt(plaintext: &[u8], key: &Aes128Key, iv: &Iv) -> Vec<u8> {
    Aes128Cbc::new(key, iv).encrypt(plaintext)
}

/// Decrypts `ciphertext` under `key` and `iv` and removes PKCS#7 padding.
pub fn decrypt(ciphertext: &[u8], key: &Aes128Key, iv: &Iv) -> Result<Vec<u8>, CbcError> {
    Aes128Cbc::new(key, iv).decrypt(ciphertext)
}

fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngCore};

    fn random_key_iv(rng: &mut impl RngCore) -> (Aes128Key, Iv) {
        let mut key = [0u8; 16];
        let mut iv = [0u8; 16];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut iv);
        (Aes128Key::from(key), iv)
    }

    #[test]
    fn round_trip_random_lengths() {
        let mut rng = rand::thread_rng();
        for len in 0..70 {
            let (key, iv) = random_key_iv(&mut rng);
            let mut plaintext = vec![0u8; len];
            rng.fill_bytes(&mut plaintext);
            let ct = encrypt(&plaintext, &key, &iv);
            assert_eq!(ct.len(), (len / BLOCK_SIZE + 1) * BLOCK_SIZE);
            assert_eq!(decrypt(&ct, &key, &iv).unwrap(), plaintext);
        }
    }

    #[test]
    fn rejects_unaligned_and_empty_ciphertext() {
        let (key, iv) = random_key_iv(&mut rand::thread_rng());
        assert_eq!(
            decrypt(&[0u8; 17], &key, &iv),
            Err(CbcError::InvalidLength { len: 17 })
        );
        assert_eq!(decrypt(&[], &key, &iv), Err(CbcError::InvalidLength { len: 0 }));
    }

    #[test]
    fn iv_changes_every_block() {
        let mut rng = rand::thread_rng();
        let (key, iv) = random_key_iv(&mut rng);
        let mut other_iv = iv;
        other_iv[0] ^= 1;
        let plaintext = [0x5au8; 48];
        let a = encrypt(&plaintext, &key, &iv);
        let b = encrypt(&plaintext, &key, &other_iv);
        for (x, y) in a.chunks(BLOCK_SIZE).zip(b.chunks(BLOCK_SIZE)) {
            assert_ne!(x, y);
        }
    }

    #[test]
    fn identical_plaintext_blocks_encrypt_differently() {
        let (key, iv) = random_key_iv(&mut rand::thread_rng());
        let ct = encrypt(&[0u8; 32], &key, &iv);
        assert_ne!(ct[..16], ct[16..32]);
    }

    #[test]
    fn session_reuses_schedule() {
        let mut rng = rand::thread_rng();
        let (key, iv) = random_key_iv(&mut rng);
        let session = Aes128Cbc::new(&key, &iv);
        assert_eq!(session.round_keys(), &expand_key(&key));
        assert_eq!(session.iv(), &iv);
        for _ in 0..8 {
            let len = rng.gen_range(0..100);
            let mut msg = vec![0u8; len];
            rng.fill_bytes(&mut msg);
            let ct = session.encrypt(&msg);
            assert_eq!(ct, encrypt(&msg, &key, &iv));
            assert_eq!(session.decrypt(&ct).unwrap(), msg);
        }
    }

    #[derive(Default)]
    struct Chains(Vec<(usize, Direction, Block)>, usize);

    impl Trace for Chains {
        fn key_schedule(&mut self, _round_keys: &RoundKeys) {
            self.1 += 1;
        }

        fn chained(&mut self, index: usize, direction: Direction, block: &Block) {
            self.0.push((index, direction, *block));
        }
    }

    #[test]
    fn trace_sees_each_chained_block() {
        let (key, iv) = random_key_iv(&mut rand::thread_rng());
        let session = Aes128Cbc::new(&key, &iv);
        let plaintext = *b"exactly sixteen!and a bit";

        let mut enc = Chains::default();
        let ct = session.encrypt_traced(&plaintext, &mut enc);
        assert_eq!(enc.1, 1);
        assert_eq!(enc.0.len(), 2);
        let mut first = to_block(&plaintext[..16]);
        xor_in_place(&mut first, &iv);
        assert_eq!(enc.0[0], (0, Direction::Encrypt, first));

        let mut dec = Chains::default();
        let pt = session.decrypt_traced(&ct, &mut dec).unwrap();
        assert_eq!(pt, plaintext);
        // decryption reports the recovered (still padded) plaintext blocks
        assert_eq!(dec.0[0], (0, Direction::Decrypt, to_block(&plaintext[..16])));
        assert_eq!(dec.0[1].2[9..], [7u8; 7]);
    }
}
