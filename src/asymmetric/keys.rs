use crate::asymmetric::systems::traditional::RsaKeyWrapper;
use crate::asymmetric::traits::KeyWrappingSystem;
use crate::common::config::CipherConfiguration;
use crate::common::errors::Error;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;

/// 收件人/发件人上下文中的 RSA 密钥句柄
///
/// 公钥总是存在；私钥只在需要解密时提供。缺少私钥时，
/// 所有解密操作都在执行任何密码学计算之前以 `Error::MissingPrivateKey` 失败。
#[derive(Clone)]
pub struct KeyPair {
    public_key: RsaPublicKey,
    private_key: Option<RsaPrivateKey>,
}

impl KeyPair {
    /// 只含公钥的密钥对，只能用于加密
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self {
            public_key,
            private_key: None,
        }
    }

    /// 从私钥构造完整的密钥对
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        Self {
            public_key: private_key.to_public_key(),
            private_key: Some(private_key),
        }
    }

    /// 按配置中的 RSA 位数生成新的密钥对
    pub fn generate(config: &CipherConfiguration) -> Result<Self, Error> {
        let (public_key, private_key) = RsaKeyWrapper::generate_keypair(config)?;
        Ok(Self {
            public_key,
            private_key: Some(private_key),
        })
    }

    /// 附加私钥。私钥必须与已有公钥匹配。
    pub fn with_private_key(mut self, private_key: RsaPrivateKey) -> Result<Self, Error> {
        self.set_private_key(private_key)?;
        Ok(self)
    }

    /// 设置私钥。需要独占访问，因此不会与进行中的操作并发修改。
    pub fn set_private_key(&mut self, private_key: RsaPrivateKey) -> Result<(), Error> {
        if private_key.to_public_key() != self.public_key {
            return Err(Error::Configuration(
                "private key does not match the public key".to_string(),
            ));
        }
        self.private_key = Some(private_key);
        Ok(())
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// 获取私钥，缺失时返回 `Error::MissingPrivateKey`
    pub fn private_key(&self) -> Result<&RsaPrivateKey, Error> {
        self.private_key.as_ref().ok_or(Error::MissingPrivateKey)
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// 丢弃私钥，返回只能加密的副本
    pub fn public_only(&self) -> Self {
        Self::new(self.public_key.clone())
    }
}

impl From<RsaPublicKey> for KeyPair {
    fn from(public_key: RsaPublicKey) -> Self {
        Self::new(public_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use rsa::traits::PublicKeyParts;
        f.debug_struct("KeyPair")
            .field("modulus_bits", &(self.public_key.size() * 8))
            .field("has_private_key", &self.has_private_key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{other_keys, recipient_keys};

    #[test]
    fn test_public_only_has_no_private_key() {
        let keys = recipient_keys().public_only();
        assert!(!keys.has_private_key());
        assert!(matches!(keys.private_key(), Err(Error::MissingPrivateKey)));
    }

    #[test]
    fn test_with_matching_private_key() {
        let full = recipient_keys();
        let private_key = full.private_key().unwrap().clone();
        let keys = full.public_only().with_private_key(private_key).unwrap();
        assert!(keys.has_private_key());
        assert_eq!(keys.public_key(), full.public_key());
    }

    #[test]
    fn test_mismatched_private_key_rejected() {
        let private_key = other_keys().private_key().unwrap().clone();
        let result = recipient_keys().public_only().with_private_key(private_key);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_debug_does_not_leak_key_material() {
        let rendered = format!("{:?}", recipient_keys());
        assert!(rendered.contains("modulus_bits: 2048"));
        assert!(rendered.contains("has_private_key: true"));
    }
}
