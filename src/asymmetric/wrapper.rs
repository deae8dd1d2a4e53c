//! `AsymmetricKeyWrapper` 将配置与 `KeyPair` 结合，向编解码器提供封装/解封操作。
use crate::asymmetric::keys::KeyPair;
use crate::asymmetric::systems::traditional::RsaKeyWrapper;
use crate::asymmetric::traits::KeyWrappingSystem;
use crate::common::config::CipherConfiguration;
use crate::common::errors::Error;
use rsa::RsaPublicKey;
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy)]
pub struct AsymmetricKeyWrapper<'a> {
    config: &'a CipherConfiguration,
}

impl<'a> AsymmetricKeyWrapper<'a> {
    pub fn new(config: &'a CipherConfiguration) -> Self {
        Self { config }
    }

    /// 使用公钥封装对称密钥
    pub fn wrap(&self, symmetric_key: &[u8], public_key: &RsaPublicKey) -> Result<Vec<u8>, Error> {
        RsaKeyWrapper::wrap(self.config, public_key, symmetric_key)
    }

    /// 使用密钥对中的私钥解封对称密钥
    pub fn unwrap(&self, wrapped_key: &[u8], key_pair: &KeyPair) -> Result<Zeroizing<Vec<u8>>, Error> {
        let private_key = key_pair.private_key()?;
        RsaKeyWrapper::unwrap(self.config, private_key, wrapped_key)
    }
}
