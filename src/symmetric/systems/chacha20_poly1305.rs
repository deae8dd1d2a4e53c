//! ChaCha20-Poly1305 对称加密实现
use crate::common::config::BlockPadding;
use crate::common::errors::Error;
use crate::symmetric::traits::SymmetricCryptographicSystem;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};

const TAG_SIZE: usize = 16;

/// ChaCha20-Poly1305 对称加密系统
#[derive(Debug)]
pub struct ChaCha20Poly1305System;

impl SymmetricCryptographicSystem for ChaCha20Poly1305System {
    const KEY_SIZE: usize = 32;
    const IV_SIZE: usize = 12;
    const BLOCK_SIZE: usize = 1;

    fn encrypt(
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
        _padding: BlockPadding,
    ) -> Result<Vec<u8>, Error> {
        Self::check_lengths(key, iv)?;
        let cipher = ChaCha20Poly1305::new_from_slice(key)
            .map_err(|e| Error::EncryptionFailure(format!("invalid ChaCha20 key: {e}")))?;
        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| Error::EncryptionFailure(format!("ChaCha20-Poly1305 encryption failed: {e}")))
    }

    fn decrypt(
        key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
        _padding: BlockPadding,
    ) -> Result<Vec<u8>, Error> {
        Self::check_lengths(key, iv)?;
        if ciphertext.len() < TAG_SIZE {
            return Err(Error::DecryptionFailure);
        }
        let cipher = ChaCha20Poly1305::new_from_slice(key).map_err(|_| Error::DecryptionFailure)?;
        cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| Error::DecryptionFailure)
    }
}
