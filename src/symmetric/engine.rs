//! `SymmetricCipherEngine` 根据配置在运行时分派到具体的对称加密系统。
use crate::common::config::{CipherConfiguration, SymmetricAlgorithm};
use crate::common::errors::Error;
use crate::symmetric::secret::SymmetricSecret;
use crate::symmetric::systems::{Aes128CbcSystem, Aes256CbcSystem, AesGcmSystem};
#[cfg(feature = "chacha")]
use crate::symmetric::systems::ChaCha20Poly1305System;
use crate::symmetric::traits::SymmetricCryptographicSystem;

/// 载荷加解密引擎，借用一份不可变配置
#[derive(Debug, Clone, Copy)]
pub struct SymmetricCipherEngine<'a> {
    config: &'a CipherConfiguration,
}

impl<'a> SymmetricCipherEngine<'a> {
    pub fn new(config: &'a CipherConfiguration) -> Self {
        Self { config }
    }

    /// 生成一次性的密钥与 IV
    pub fn generate(&self) -> Result<SymmetricSecret, Error> {
        SymmetricSecret::generate(self.config.key_size, self.config.iv_size)
    }

    pub fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, Error> {
        self.check_sizes(key, iv)?;
        let padding = self.config.padding;
        match self.config.algorithm {
            SymmetricAlgorithm::Aes128Cbc => Aes128CbcSystem::encrypt(key, iv, plaintext, padding),
            SymmetricAlgorithm::Aes256Cbc => Aes256CbcSystem::encrypt(key, iv, plaintext, padding),
            SymmetricAlgorithm::Aes256Gcm => AesGcmSystem::encrypt(key, iv, plaintext, padding),
            #[cfg(feature = "chacha")]
            SymmetricAlgorithm::ChaCha20Poly1305 => {
                ChaCha20Poly1305System::encrypt(key, iv, plaintext, padding)
            }
        }
    }

    pub fn decrypt(&self, ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, Error> {
        self.check_sizes(key, iv)?;
        let padding = self.config.padding;
        match self.config.algorithm {
            SymmetricAlgorithm::Aes128Cbc => Aes128CbcSystem::decrypt(key, iv, ciphertext, padding),
            SymmetricAlgorithm::Aes256Cbc => Aes256CbcSystem::decrypt(key, iv, ciphertext, padding),
            SymmetricAlgorithm::Aes256Gcm => AesGcmSystem::decrypt(key, iv, ciphertext, padding),
            #[cfg(feature = "chacha")]
            SymmetricAlgorithm::ChaCha20Poly1305 => {
                ChaCha20Poly1305System::decrypt(key, iv, ciphertext, padding)
            }
        }
    }

    // 配置中声明的长度优先于算法自身的校验，以便报告配置层面的错误
    fn check_sizes(&self, key: &[u8], iv: &[u8]) -> Result<(), Error> {
        if key.len() != self.config.key_size {
            return Err(Error::length_mismatch("key", self.config.key_size, key.len()));
        }
        if iv.len() != self.config.iv_size {
            return Err(Error::length_mismatch("IV", self.config.iv_size, iv.len()));
        }
        Ok(())
    }
}
