//! `RsaKeyWrapper` 提供了基于 RSA 的对称密钥封装功能，
//! 支持 PKCS#1 v1.5 与 OAEP-SHA256 两种随机化填充。

use crate::asymmetric::traits::KeyWrappingSystem;
use crate::common::config::{CipherConfiguration, RsaPadding};
use crate::common::errors::Error;
use rsa::rand_core::OsRng as RsaOsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

/// RSA 密钥封装实现
pub struct RsaKeyWrapper;

impl KeyWrappingSystem for RsaKeyWrapper {
    type PublicKey = RsaPublicKey;
    type PrivateKey = RsaPrivateKey;

    fn generate_keypair(
        config: &CipherConfiguration,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), Error> {
        let mut rng = RsaOsRng;
        let private_key = RsaPrivateKey::new(&mut rng, config.rsa_key_bits).map_err(|e| {
            Error::Configuration(format!(
                "failed to generate a {}-bit RSA key: {e}",
                config.rsa_key_bits
            ))
        })?;
        let public_key = RsaPublicKey::from(&private_key);
        Ok((public_key, private_key))
    }

    fn wrap(
        config: &CipherConfiguration,
        public_key: &Self::PublicKey,
        symmetric_key: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let modulus_len = config.rsa_key_bits / 8;
        if public_key.size() != modulus_len {
            return Err(Error::Configuration(format!(
                "public key modulus is {} bits but the configuration expects {}",
                public_key.size() * 8,
                config.rsa_key_bits
            )));
        }

        let overhead = config.rsa_padding.overhead();
        if symmetric_key.len() + overhead > modulus_len {
            return Err(Error::UnsupportedKeySize {
                key_len: symmetric_key.len(),
                modulus_len,
                overhead,
            });
        }

        let mut rng = RsaOsRng;
        let result = match config.rsa_padding {
            RsaPadding::Pkcs1v15 => public_key.encrypt(&mut rng, Pkcs1v15Encrypt, symmetric_key),
            RsaPadding::OaepSha256 => {
                public_key.encrypt(&mut rng, Oaep::new::<Sha256>(), symmetric_key)
            }
        };
        result.map_err(|e| Error::EncryptionFailure(format!("RSA key wrapping failed: {e}")))
    }

    fn unwrap(
        config: &CipherConfiguration,
        private_key: &Self::PrivateKey,
        wrapped_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        if wrapped_key.len() != private_key.size() {
            return Err(Error::DecryptionFailure);
        }

        let result = match config.rsa_padding {
            RsaPadding::Pkcs1v15 => private_key.decrypt(Pkcs1v15Encrypt, wrapped_key),
            RsaPadding::OaepSha256 => private_key.decrypt(Oaep::new::<Sha256>(), wrapped_key),
        };
        // 填充错误与格式错误统一报告，避免形成填充预言机
        result
            .map(Zeroizing::new)
            .map_err(|_| Error::DecryptionFailure)
    }
}
