//! 单元测试共享的 RSA 密钥对。生成 2048 位密钥较慢，每个进程只生成一次。
use crate::asymmetric::KeyPair;
use crate::common::config::CipherConfiguration;
use std::sync::OnceLock;

pub(crate) fn recipient_keys() -> &'static KeyPair {
    static KEYS: OnceLock<KeyPair> = OnceLock::new();
    KEYS.get_or_init(|| KeyPair::generate(&CipherConfiguration::default()).unwrap())
}

pub(crate) fn other_keys() -> &'static KeyPair {
    static KEYS: OnceLock<KeyPair> = OnceLock::new();
    KEYS.get_or_init(|| KeyPair::generate(&CipherConfiguration::default()).unwrap())
}

/// 以给定私钥自签的测试证书
#[cfg(feature = "key-store")]
pub(crate) fn self_signed_certificate(key: &rsa::RsaPrivateKey) -> x509_cert::Certificate {
    use rsa::pkcs1v15::{Signature, SigningKey};
    use sha2::Sha256;
    use std::str::FromStr;
    use std::time::Duration;
    use x509_cert::builder::{Builder, CertificateBuilder, Profile};
    use x509_cert::name::Name;
    use x509_cert::serial_number::SerialNumber;
    use x509_cert::spki::SubjectPublicKeyInfoOwned;
    use x509_cert::time::Validity;

    let signer = SigningKey::<Sha256>::new(key.clone());
    let spki = SubjectPublicKeyInfoOwned::from_key(key.to_public_key()).unwrap();
    let builder = CertificateBuilder::new(
        Profile::Root,
        SerialNumber::from(42u32),
        Validity::from_now(Duration::from_secs(3600)).unwrap(),
        Name::from_str("CN=transit-seal recipient,O=Transit Seal").unwrap(),
        spki,
        &signer,
    )
    .unwrap();
    builder.build::<Signature>().unwrap()
}
