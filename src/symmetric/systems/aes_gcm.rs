//! AES-GCM 对称加密实现
//!
//! 密文格式为 `[加密数据][16 字节认证标签]`，nonce 即信封中的 IV，由调用方单独传输。
use crate::common::config::BlockPadding;
use crate::common::errors::Error;
use crate::symmetric::traits::SymmetricCryptographicSystem;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16; // AES-GCM's tag is 16 bytes

/// AES-256-GCM 对称加密系统
#[derive(Debug)]
pub struct AesGcmSystem;

impl SymmetricCryptographicSystem for AesGcmSystem {
    const KEY_SIZE: usize = KEY_SIZE;
    const IV_SIZE: usize = NONCE_SIZE;
    const BLOCK_SIZE: usize = 16;

    fn encrypt(
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
        _padding: BlockPadding, // AEAD 模式不使用块填充
    ) -> Result<Vec<u8>, Error> {
        Self::check_lengths(key, iv)?;
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| Error::EncryptionFailure(format!("invalid AES-GCM key: {e}")))?;

        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| Error::EncryptionFailure(format!("AES-GCM encryption failed: {e}")))
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
        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| Error::DecryptionFailure)?;

        cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| Error::DecryptionFailure)
    }
}
