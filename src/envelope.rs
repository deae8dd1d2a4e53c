//! # 信封编解码器
//!
//! `EnvelopeCodec` 把对称加密引擎、RSA 密钥封装与可选的 IV 混合钩子组合成
//! 对外的加解密操作：
//!
//! 1. 生成一次性的对称密钥与 IV；
//! 2. 用对称密钥加密载荷；
//! 3. 用收件人公钥封装对称密钥；
//! 4. （可选）用 `IvTransform` 把 IV 混入密文或封装密钥。
//!
//! 解密按相反顺序进行，并要求密钥对中存在私钥。所有对称密钥与 IV 缓冲区在
//! 操作结束时（包括任何错误路径）都会被擦除。

pub mod base64;
#[cfg(feature = "parallel")]
pub mod batch;
pub mod text;

use crate::asymmetric::{AsymmetricKeyWrapper, KeyPair};
use crate::common::config::CipherConfiguration;
use crate::common::errors::Error;
use crate::mixer::IvTransform;
use crate::symmetric::SymmetricCipherEngine;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// 加密结果：密文、封装后的对称密钥与 IV
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(with = "serde_bytes")]
    pub ciphertext: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub wrapped_key: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub iv: Vec<u8>,
}

/// IV 已被混入密文或封装密钥的加密结果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixedEnvelope {
    #[serde(with = "serde_bytes")]
    pub ciphertext: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub wrapped_key: Vec<u8>,
}

/// 信封加解密的入口
///
/// 编解码器只借用配置，本身不持有可变状态，可以在线程间共享。
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeCodec<'a> {
    config: &'a CipherConfiguration,
    engine: SymmetricCipherEngine<'a>,
    wrapper: AsymmetricKeyWrapper<'a>,
}

impl<'a> EnvelopeCodec<'a> {
    /// 校验配置并创建编解码器
    pub fn new(config: &'a CipherConfiguration) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            engine: SymmetricCipherEngine::new(config),
            wrapper: AsymmetricKeyWrapper::new(config),
        })
    }

    pub fn config(&self) -> &'a CipherConfiguration {
        self.config
    }

    /// 生成密钥与 IV，加密载荷，并用公钥封装对称密钥
    pub fn encrypt(&self, plaintext: &[u8], public_key: &RsaPublicKey) -> Result<Envelope, Error> {
        // secret 在函数返回时被擦除，无论成功与否
        let secret = self.engine.generate()?;
        let ciphertext = self.engine.encrypt(plaintext, secret.key(), secret.iv())?;
        let wrapped_key = self.wrapper.wrap(secret.key(), public_key)?;

        debug!(
            algorithm = ?self.config.algorithm,
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            wrapped_key_len = wrapped_key.len(),
            "sealed envelope"
        );

        Ok(Envelope {
            ciphertext,
            wrapped_key,
            iv: secret.iv().to_vec(),
        })
    }

    /// 加密后使用 `mixer` 将 IV 混入密文或封装密钥
    pub fn encrypt_mixed<T>(
        &self,
        plaintext: &[u8],
        public_key: &RsaPublicKey,
        mixer: &T,
    ) -> Result<MixedEnvelope, Error>
    where
        T: IvTransform + ?Sized,
    {
        let envelope = self.encrypt(plaintext, public_key)?;
        let mixed = mixer.mix(envelope)?;
        trace!(
            ciphertext_len = mixed.ciphertext.len(),
            wrapped_key_len = mixed.wrapped_key.len(),
            "mixed IV into envelope"
        );
        Ok(mixed)
    }

    /// 使用显式 IV 解密信封
    pub fn decrypt(&self, envelope: &Envelope, key_pair: &KeyPair) -> Result<Vec<u8>, Error> {
        self.decrypt_parts(
            &envelope.ciphertext,
            &envelope.wrapped_key,
            Some(&envelope.iv),
            key_pair,
            None,
        )
    }

    /// 先用 `separator` 取回 IV，再解密
    pub fn decrypt_mixed<T>(
        &self,
        mixed: &MixedEnvelope,
        key_pair: &KeyPair,
        separator: &T,
    ) -> Result<Vec<u8>, Error>
    where
        T: IvTransform + ?Sized,
    {
        key_pair.private_key()?;
        let envelope = separator.separate(mixed.clone())?;
        self.open(
            &envelope.ciphertext,
            &envelope.wrapped_key,
            &envelope.iv,
            key_pair,
        )
    }

    /// 通用解密入口。
    ///
    /// 提供 `separator` 时由它从输入中取回 IV（显式 IV 被忽略）；
    /// 否则必须提供显式 IV，两者皆无时返回 `Error::Configuration`。
    pub fn decrypt_parts(
        &self,
        ciphertext: &[u8],
        wrapped_key: &[u8],
        iv: Option<&[u8]>,
        key_pair: &KeyPair,
        separator: Option<&dyn IvTransform>,
    ) -> Result<Vec<u8>, Error> {
        // 缺少私钥时不进行任何密码学计算
        key_pair.private_key()?;

        match (separator, iv) {
            (Some(separator), _) => {
                let envelope = separator.separate(MixedEnvelope {
                    ciphertext: ciphertext.to_vec(),
                    wrapped_key: wrapped_key.to_vec(),
                })?;
                self.open(
                    &envelope.ciphertext,
                    &envelope.wrapped_key,
                    &envelope.iv,
                    key_pair,
                )
            }
            (None, Some(iv)) => self.open(ciphertext, wrapped_key, iv, key_pair),
            (None, None) => Err(Error::missing_iv()),
        }
    }

    fn open(
        &self,
        ciphertext: &[u8],
        wrapped_key: &[u8],
        iv: &[u8],
        key_pair: &KeyPair,
    ) -> Result<Vec<u8>, Error> {
        if iv.len() != self.config.iv_size {
            return Err(Error::length_mismatch("IV", self.config.iv_size, iv.len()));
        }

        let key = self.wrapper.unwrap(wrapped_key, key_pair)?;
        // 解封出的密钥长度不符只可能来自错误的封装密钥，按解密失败处理
        if key.len() != self.config.key_size {
            return Err(Error::DecryptionFailure);
        }

        let plaintext = self.engine.decrypt(ciphertext, &key, iv)?;
        debug!(
            algorithm = ?self.config.algorithm,
            ciphertext_len = ciphertext.len(),
            plaintext_len = plaintext.len(),
            "opened envelope"
        );
        Ok(plaintext)
    }
}
