//! Base64 表示层：在字节信封之上提供文本友好的输入输出，不改变核心协议。
use super::{Envelope, EnvelopeCodec, MixedEnvelope};
use crate::asymmetric::KeyPair;
use crate::common::errors::Error;
use crate::mixer::IvTransform;
use base64::{Engine, engine::general_purpose};
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// 各字段以标准 Base64 编码的信封
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base64Envelope {
    pub ciphertext: String,
    pub wrapped_key: String,
    pub iv: String,
}

/// 各字段以标准 Base64 编码的混合信封
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base64MixedEnvelope {
    pub ciphertext: String,
    pub wrapped_key: String,
}

impl From<&Envelope> for Base64Envelope {
    fn from(envelope: &Envelope) -> Self {
        Self {
            ciphertext: general_purpose::STANDARD.encode(&envelope.ciphertext),
            wrapped_key: general_purpose::STANDARD.encode(&envelope.wrapped_key),
            iv: general_purpose::STANDARD.encode(&envelope.iv),
        }
    }
}

impl TryFrom<&Base64Envelope> for Envelope {
    type Error = Error;

    fn try_from(encoded: &Base64Envelope) -> Result<Self, Self::Error> {
        Ok(Self {
            ciphertext: general_purpose::STANDARD.decode(&encoded.ciphertext)?,
            wrapped_key: general_purpose::STANDARD.decode(&encoded.wrapped_key)?,
            iv: general_purpose::STANDARD.decode(&encoded.iv)?,
        })
    }
}

impl From<&MixedEnvelope> for Base64MixedEnvelope {
    fn from(mixed: &MixedEnvelope) -> Self {
        Self {
            ciphertext: general_purpose::STANDARD.encode(&mixed.ciphertext),
            wrapped_key: general_purpose::STANDARD.encode(&mixed.wrapped_key),
        }
    }
}

impl TryFrom<&Base64MixedEnvelope> for MixedEnvelope {
    type Error = Error;

    fn try_from(encoded: &Base64MixedEnvelope) -> Result<Self, Self::Error> {
        Ok(Self {
            ciphertext: general_purpose::STANDARD.decode(&encoded.ciphertext)?,
            wrapped_key: general_purpose::STANDARD.decode(&encoded.wrapped_key)?,
        })
    }
}

impl EnvelopeCodec<'_> {
    pub fn encrypt_and_base64_encode(
        &self,
        data: &[u8],
        public_key: &RsaPublicKey,
    ) -> Result<Base64Envelope, Error> {
        let envelope = self.encrypt(data, public_key)?;
        Ok(Base64Envelope::from(&envelope))
    }

    pub fn encrypt_and_base64_encode_mixed<T>(
        &self,
        data: &[u8],
        public_key: &RsaPublicKey,
        mixer: &T,
    ) -> Result<Base64MixedEnvelope, Error>
    where
        T: IvTransform + ?Sized,
    {
        let mixed = self.encrypt_mixed(data, public_key, mixer)?;
        Ok(Base64MixedEnvelope::from(&mixed))
    }

    pub fn encrypt_and_base64_encode_str(
        &self,
        text: &str,
        public_key: &RsaPublicKey,
    ) -> Result<Base64Envelope, Error> {
        let envelope = self.encrypt_str(text, public_key)?;
        Ok(Base64Envelope::from(&envelope))
    }

    pub fn encrypt_and_base64_encode_str_mixed<T>(
        &self,
        text: &str,
        public_key: &RsaPublicKey,
        mixer: &T,
    ) -> Result<Base64MixedEnvelope, Error>
    where
        T: IvTransform + ?Sized,
    {
        let mixed = self.encrypt_str_mixed(text, public_key, mixer)?;
        Ok(Base64MixedEnvelope::from(&mixed))
    }

    pub fn base64_decode_and_decrypt(
        &self,
        encoded: &Base64Envelope,
        key_pair: &KeyPair,
    ) -> Result<Vec<u8>, Error> {
        key_pair.private_key()?;
        let envelope = Envelope::try_from(encoded)?;
        self.decrypt(&envelope, key_pair)
    }

    pub fn base64_decode_and_decrypt_mixed<T>(
        &self,
        encoded: &Base64MixedEnvelope,
        key_pair: &KeyPair,
        separator: &T,
    ) -> Result<Vec<u8>, Error>
    where
        T: IvTransform + ?Sized,
    {
        key_pair.private_key()?;
        let mixed = MixedEnvelope::try_from(encoded)?;
        self.decrypt_mixed(&mixed, key_pair, separator)
    }

    pub fn base64_decode_and_decrypt_to_string(
        &self,
        encoded: &Base64Envelope,
        key_pair: &KeyPair,
    ) -> Result<String, Error> {
        let bytes = Zeroizing::new(self.base64_decode_and_decrypt(encoded, key_pair)?);
        self.config.text_encoding.decode(&bytes)
    }

    pub fn base64_decode_and_decrypt_mixed_to_string<T>(
        &self,
        encoded: &Base64MixedEnvelope,
        key_pair: &KeyPair,
        separator: &T,
    ) -> Result<String, Error>
    where
        T: IvTransform + ?Sized,
    {
        let bytes =
            Zeroizing::new(self.base64_decode_and_decrypt_mixed(encoded, key_pair, separator)?);
        self.config.text_encoding.decode(&bytes)
    }
}
