//! # 密钥加载 (Key Store)
//!
//! 从 PEM 或 DER 字节、或从文件中加载 RSA 密钥。
//!
//! - 公钥：SubjectPublicKeyInfo (`PUBLIC KEY`)、PKCS#1 (`RSA PUBLIC KEY`)，
//!   或 X.509 证书 (`CERTIFICATE`) 中的主体公钥
//! - 私钥：PKCS#8 (`PRIVATE KEY`)、PKCS#1 (`RSA PRIVATE KEY`)，
//!   口令保护的 PKCS#8 (`ENCRYPTED PRIVATE KEY`)，以及 PKCS#12 (`.p12`/`.pfx`) 密钥库
//!
//! 加载得到的密钥以 `KeyPair` 的形式交给信封编解码器使用。

use crate::asymmetric::KeyPair;
use p12_keystore::KeyStore;
use pkcs8::{Document, EncryptedPrivateKeyInfo, SecretDocument};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use secrecy::{ExposeSecret, SecretString};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use x509_cert::Certificate;
use x509_cert::der::{Decode, Encode};
use zeroize::Zeroizing;

const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";
const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
const ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";
const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// 密钥加载错误
#[derive(Error, Debug)]
pub enum KeyStoreError {
    /// 口令错误，或加密的私钥未提供口令
    #[error("wrong or missing passphrase for encrypted private key")]
    WrongPassphrase,

    #[error("unable to read key file: {0}")]
    UnreadableFile(#[from] std::io::Error),

    #[error("unsupported key format: {0}")]
    UnsupportedFormat(String),
}

/// 加载 RSA 公钥，接受 SPKI、PKCS#1 或 X.509 证书，PEM 或 DER
pub fn load_public_key(bytes: &[u8]) -> Result<RsaPublicKey, KeyStoreError> {
    if let Some(pem) = as_pem(bytes) {
        let (label, document) = Document::from_pem(pem)
            .map_err(|e| KeyStoreError::UnsupportedFormat(format!("malformed PEM: {e}")))?;
        let der = document.as_bytes();
        return match label {
            PUBLIC_KEY_LABEL => RsaPublicKey::from_public_key_der(der)
                .map_err(|e| KeyStoreError::UnsupportedFormat(e.to_string())),
            RSA_PUBLIC_KEY_LABEL => RsaPublicKey::from_pkcs1_der(der)
                .map_err(|e| KeyStoreError::UnsupportedFormat(e.to_string())),
            CERTIFICATE_LABEL => certificate_public_key(der),
            other => Err(KeyStoreError::UnsupportedFormat(format!(
                "unexpected PEM label '{other}' for a public key"
            ))),
        };
    }

    RsaPublicKey::from_public_key_der(bytes)
        .or_else(|_| RsaPublicKey::from_pkcs1_der(bytes))
        .or_else(|_| certificate_public_key(bytes))
        .map_err(|_| {
            KeyStoreError::UnsupportedFormat(
                "DER input is neither SPKI, PKCS#1 RSA public key nor X.509 certificate"
                    .to_string(),
            )
        })
}

/// 取出 X.509 证书中的主体公钥（不校验证书链与有效期）
fn certificate_public_key(der: &[u8]) -> Result<RsaPublicKey, KeyStoreError> {
    let certificate = Certificate::from_der(der)
        .map_err(|e| KeyStoreError::UnsupportedFormat(format!("malformed certificate: {e}")))?;
    let spki = certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| KeyStoreError::UnsupportedFormat(e.to_string()))?;
    RsaPublicKey::from_public_key_der(&spki).map_err(|_| {
        KeyStoreError::UnsupportedFormat("certificate does not carry an RSA public key".to_string())
    })
}

pub fn load_public_key_file<P: AsRef<Path>>(path: P) -> Result<RsaPublicKey, KeyStoreError> {
    let bytes = fs::read(path.as_ref())?;
    let key = load_public_key(&bytes)?;
    debug!(path = %path.as_ref().display(), "loaded public key");
    Ok(key)
}

/// 加载 RSA 私钥。
///
/// 加密的 PKCS#8 与 PKCS#12 需要 `passphrase`；未加密的密钥会忽略传入的口令。
pub fn load_private_key(
    bytes: &[u8],
    passphrase: Option<&SecretString>,
) -> Result<RsaPrivateKey, KeyStoreError> {
    if let Some(pem) = as_pem(bytes) {
        let (label, document) = SecretDocument::from_pem(pem)
            .map_err(|e| KeyStoreError::UnsupportedFormat(format!("malformed PEM: {e}")))?;
        let der = document.as_bytes();
        return match label {
            ENCRYPTED_PRIVATE_KEY_LABEL => decrypt_pkcs8(der, passphrase),
            PRIVATE_KEY_LABEL => RsaPrivateKey::from_pkcs8_der(der)
                .map_err(|e| KeyStoreError::UnsupportedFormat(e.to_string())),
            RSA_PRIVATE_KEY_LABEL => RsaPrivateKey::from_pkcs1_der(der)
                .map_err(|e| KeyStoreError::UnsupportedFormat(e.to_string())),
            other => Err(KeyStoreError::UnsupportedFormat(format!(
                "unexpected PEM label '{other}' for a private key"
            ))),
        };
    }

    if EncryptedPrivateKeyInfo::try_from(bytes).is_ok() {
        return decrypt_pkcs8(bytes, passphrase);
    }
    if let Ok(key) = RsaPrivateKey::from_pkcs8_der(bytes)
        .or_else(|_| RsaPrivateKey::from_pkcs1_der(bytes))
    {
        return Ok(key);
    }
    // PKCS#12 允许空口令
    let empty = SecretString::new("".into());
    load_pkcs12(bytes, passphrase.unwrap_or(&empty)).map_err(|e| match e {
        KeyStoreError::WrongPassphrase => KeyStoreError::WrongPassphrase,
        _ => KeyStoreError::UnsupportedFormat(
            "DER input is neither PKCS#8, PKCS#1 RSA private key nor PKCS#12".to_string(),
        ),
    })
}

/// 从 PKCS#12 密钥库中取出第一个私钥。
///
/// MAC 校验失败或密钥包无法解密时返回 `WrongPassphrase`。
pub fn load_pkcs12(
    bytes: &[u8],
    passphrase: &SecretString,
) -> Result<RsaPrivateKey, KeyStoreError> {
    use p12_keystore::error::Error as Pkcs12Error;

    let store = KeyStore::from_pkcs12(bytes, passphrase.expose_secret()).map_err(|e| match e {
        Pkcs12Error::MacError(_) | Pkcs12Error::UnpadError | Pkcs12Error::Pkcs5Error(_) => {
            KeyStoreError::WrongPassphrase
        }
        other => KeyStoreError::UnsupportedFormat(format!("malformed PKCS#12: {other}")),
    })?;
    let (alias, chain) = store.private_key_chain().ok_or_else(|| {
        KeyStoreError::UnsupportedFormat("PKCS#12 file holds no private key".to_string())
    })?;
    let key = RsaPrivateKey::from_pkcs8_der(chain.key())
        .map_err(|e| KeyStoreError::UnsupportedFormat(e.to_string()))?;
    debug!(alias, "loaded private key from PKCS#12");
    Ok(key)
}

pub fn load_pkcs12_file<P: AsRef<Path>>(
    path: P,
    passphrase: &SecretString,
) -> Result<RsaPrivateKey, KeyStoreError> {
    let bytes = Zeroizing::new(fs::read(path.as_ref())?);
    load_pkcs12(&bytes, passphrase)
}

pub fn load_private_key_file<P: AsRef<Path>>(
    path: P,
    passphrase: Option<&SecretString>,
) -> Result<RsaPrivateKey, KeyStoreError> {
    let bytes = Zeroizing::new(fs::read(path.as_ref())?);
    let key = load_private_key(&bytes, passphrase)?;
    debug!(path = %path.as_ref().display(), "loaded private key");
    Ok(key)
}

fn decrypt_pkcs8(
    der: &[u8],
    passphrase: Option<&SecretString>,
) -> Result<RsaPrivateKey, KeyStoreError> {
    let passphrase = passphrase.ok_or(KeyStoreError::WrongPassphrase)?;
    let info = EncryptedPrivateKeyInfo::try_from(der)
        .map_err(|e| KeyStoreError::UnsupportedFormat(e.to_string()))?;
    let document = info
        .decrypt(passphrase.expose_secret().as_bytes())
        .map_err(|_| KeyStoreError::WrongPassphrase)?;
    // 错误口令偶尔能通过填充检查，解出的内容不是合法密钥时同样视为口令错误
    RsaPrivateKey::from_pkcs8_der(document.as_bytes()).map_err(|_| KeyStoreError::WrongPassphrase)
}

fn as_pem(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes)
        .ok()
        .map(str::trim_start)
        .filter(|text| text.starts_with("-----BEGIN "))
}

impl KeyPair {
    /// 从公钥文件与可选的私钥文件构造密钥对
    pub fn from_files<P, Q>(
        public_key_path: P,
        private_key_path: Option<Q>,
        passphrase: Option<&SecretString>,
    ) -> Result<Self, crate::common::errors::Error>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let key_pair = KeyPair::new(load_public_key_file(public_key_path)?);
        match private_key_path {
            Some(path) => key_pair.with_private_key(load_private_key_file(path, passphrase)?),
            None => Ok(key_pair),
        }
    }

    /// 从 PKCS#12 密钥库构造完整的密钥对，公钥由私钥推导
    pub fn from_pkcs12_file<P: AsRef<Path>>(
        path: P,
        passphrase: &SecretString,
    ) -> Result<Self, crate::common::errors::Error> {
        Ok(KeyPair::from_private_key(load_pkcs12_file(path, passphrase)?))
    }
}
