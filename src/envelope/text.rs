//! 字符串载荷的加解密，按配置中的文本编码在字符串与字节之间转换。
use super::{Envelope, EnvelopeCodec, MixedEnvelope};
use crate::asymmetric::KeyPair;
use crate::common::errors::Error;
use crate::mixer::IvTransform;
use rsa::RsaPublicKey;
use zeroize::Zeroizing;

impl EnvelopeCodec<'_> {
    pub fn encrypt_str(&self, text: &str, public_key: &RsaPublicKey) -> Result<Envelope, Error> {
        let bytes = Zeroizing::new(self.config.text_encoding.encode(text)?);
        self.encrypt(&bytes, public_key)
    }

    pub fn encrypt_str_mixed<T>(
        &self,
        text: &str,
        public_key: &RsaPublicKey,
        mixer: &T,
    ) -> Result<MixedEnvelope, Error>
    where
        T: IvTransform + ?Sized,
    {
        let bytes = Zeroizing::new(self.config.text_encoding.encode(text)?);
        self.encrypt_mixed(&bytes, public_key, mixer)
    }

    /// 解密并按配置的文本编码解码，无法解码时返回 `Error::Encoding`
    pub fn decrypt_to_string(&self, envelope: &Envelope, key_pair: &KeyPair) -> Result<String, Error> {
        let bytes = Zeroizing::new(self.decrypt(envelope, key_pair)?);
        self.config.text_encoding.decode(&bytes)
    }

    pub fn decrypt_mixed_to_string<T>(
        &self,
        mixed: &MixedEnvelope,
        key_pair: &KeyPair,
        separator: &T,
    ) -> Result<String, Error>
    where
        T: IvTransform + ?Sized,
    {
        let bytes = Zeroizing::new(self.decrypt_mixed(mixed, key_pair, separator)?);
        self.config.text_encoding.decode(&bytes)
    }
}
