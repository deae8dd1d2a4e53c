//! # IV 混合钩子
//!
//! 某些传输格式没有单独的 IV 字段。`IvTransform` 允许调用方把 IV 折叠进密文或
//! 封装后的密钥中（`mix`），并在解密前把它取回（`separate`）。
//!
//! 两个操作必须互为精确的逆：对任意信封 `e`，`separate(mix(e)) == e`。
//! 字节布局完全由实现者决定，这里提供的内置实现只是常见布局的便捷版本。

use crate::common::config::CipherConfiguration;
use crate::common::errors::Error;
use crate::envelope::{Envelope, MixedEnvelope};

/// IV 混合与分离的一对互逆变换
pub trait IvTransform {
    /// 将 IV 嵌入密文或封装密钥
    fn mix(&self, envelope: Envelope) -> Result<MixedEnvelope, Error>;

    /// 从密文或封装密钥中取回 IV
    fn separate(&self, mixed: MixedEnvelope) -> Result<Envelope, Error>;
}

impl<T: IvTransform + ?Sized> IvTransform for &T {
    fn mix(&self, envelope: Envelope) -> Result<MixedEnvelope, Error> {
        (**self).mix(envelope)
    }

    fn separate(&self, mixed: MixedEnvelope) -> Result<Envelope, Error> {
        (**self).separate(mixed)
    }
}

/// 将 IV 放在密文之前：`ciphertext' = iv || ciphertext`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrependIvToCiphertext {
    iv_size: usize,
}

impl PrependIvToCiphertext {
    pub fn new(iv_size: usize) -> Self {
        Self { iv_size }
    }

    pub fn for_config(config: &CipherConfiguration) -> Self {
        Self::new(config.iv_size)
    }
}

impl IvTransform for PrependIvToCiphertext {
    fn mix(&self, envelope: Envelope) -> Result<MixedEnvelope, Error> {
        if envelope.iv.len() != self.iv_size {
            return Err(Error::length_mismatch("IV", self.iv_size, envelope.iv.len()));
        }
        let mut ciphertext = Vec::with_capacity(envelope.iv.len() + envelope.ciphertext.len());
        ciphertext.extend_from_slice(&envelope.iv);
        ciphertext.extend_from_slice(&envelope.ciphertext);
        Ok(MixedEnvelope {
            ciphertext,
            wrapped_key: envelope.wrapped_key,
        })
    }

    fn separate(&self, mixed: MixedEnvelope) -> Result<Envelope, Error> {
        if mixed.ciphertext.len() < self.iv_size {
            return Err(Error::DecryptionFailure);
        }
        let mut iv = mixed.ciphertext;
        let ciphertext = iv.split_off(self.iv_size);
        Ok(Envelope {
            ciphertext,
            wrapped_key: mixed.wrapped_key,
            iv,
        })
    }
}

/// 将 IV 追加到封装密钥之后：`wrapped_key' = wrapped_key || iv`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendIvToWrappedKey {
    iv_size: usize,
}

impl AppendIvToWrappedKey {
    pub fn new(iv_size: usize) -> Self {
        Self { iv_size }
    }

    pub fn for_config(config: &CipherConfiguration) -> Self {
        Self::new(config.iv_size)
    }
}

impl IvTransform for AppendIvToWrappedKey {
    fn mix(&self, envelope: Envelope) -> Result<MixedEnvelope, Error> {
        if envelope.iv.len() != self.iv_size {
            return Err(Error::length_mismatch("IV", self.iv_size, envelope.iv.len()));
        }
        let Envelope {
            ciphertext,
            mut wrapped_key,
            iv,
        } = envelope;
        wrapped_key.extend_from_slice(&iv);
        Ok(MixedEnvelope {
            ciphertext,
            wrapped_key,
        })
    }

    fn separate(&self, mixed: MixedEnvelope) -> Result<Envelope, Error> {
        let MixedEnvelope {
            ciphertext,
            mut wrapped_key,
        } = mixed;
        let Some(split_at) = wrapped_key.len().checked_sub(self.iv_size) else {
            return Err(Error::DecryptionFailure);
        };
        let iv = wrapped_key.split_off(split_at);
        Ok(Envelope {
            ciphertext,
            wrapped_key,
            iv,
        })
    }
}

/// 由调用方提供的一对闭包组成的变换
pub struct MixerPair<M, S> {
    mixer: M,
    separator: S,
}

impl<M, S> MixerPair<M, S>
where
    M: Fn(Envelope) -> Result<MixedEnvelope, Error>,
    S: Fn(MixedEnvelope) -> Result<Envelope, Error>,
{
    pub fn new(mixer: M, separator: S) -> Self {
        Self { mixer, separator }
    }
}

impl<M, S> IvTransform for MixerPair<M, S>
where
    M: Fn(Envelope) -> Result<MixedEnvelope, Error>,
    S: Fn(MixedEnvelope) -> Result<Envelope, Error>,
{
    fn mix(&self, envelope: Envelope) -> Result<MixedEnvelope, Error> {
        (self.mixer)(envelope)
    }

    fn separate(&self, mixed: MixedEnvelope) -> Result<Envelope, Error> {
        (self.separator)(mixed)
    }
}

/// 诊断检查：`separate(mix(envelope))` 必须还原出原始信封。
///
/// 运行时不会调用，适合在测试中验证自定义变换。
pub fn verify_inverse<T: IvTransform + ?Sized>(
    transform: &T,
    envelope: &Envelope,
) -> Result<(), Error> {
    let mixed = transform.mix(envelope.clone())?;
    let restored = transform
        .separate(mixed)
        .map_err(|_| Error::MixerInverseMismatch)?;
    if &restored == envelope {
        Ok(())
    } else {
        Err(Error::MixerInverseMismatch)
    }
}
