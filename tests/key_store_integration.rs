//!
//! 密钥加载集成测试
//!
//! 将密钥以不同格式写入临时文件，再通过 `key_store` 读回并完成信封往返。
//!

mod common;

use common::recipient_keys;
use p12_keystore::{KeyStore, KeyStoreEntry, PrivateKeyChain};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs1v15::{Signature, SigningKey};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::rand_core::OsRng as RsaOsRng;
use secrecy::SecretString;
use sha2::Sha256;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tempfile::tempdir;
use x509_cert::builder::{Builder, CertificateBuilder, Profile};
use x509_cert::der::{Encode, EncodePem};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::time::Validity;
use transit_seal::key_store::{self, KeyStoreError};
use transit_seal::prelude::*;

const PASSPHRASE: &str = "test-password-transit";

fn write(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn self_signed_certificate(key: &RsaPrivateKey) -> x509_cert::Certificate {
    let signer = SigningKey::<Sha256>::new(key.clone());
    let spki = SubjectPublicKeyInfoOwned::from_key(key.to_public_key()).unwrap();
    CertificateBuilder::new(
        Profile::Root,
        SerialNumber::from(7u32),
        Validity::from_now(Duration::from_secs(24 * 3600)).unwrap(),
        Name::from_str("CN=recipient.example,O=Transit Seal").unwrap(),
        spki,
        &signer,
    )
    .unwrap()
    .build::<Signature>()
    .unwrap()
}

fn pkcs12_bytes(key: &RsaPrivateKey, passphrase: &str) -> Vec<u8> {
    let certificate = self_signed_certificate(key).to_der().unwrap();
    let chain = PrivateKeyChain::new(
        key.to_pkcs8_der().unwrap().as_bytes(),
        b"recipient",
        [p12_keystore::Certificate::from_der(&certificate).unwrap()],
    );
    let mut store = KeyStore::new();
    store.add_entry("recipient", KeyStoreEntry::PrivateKeyChain(chain));
    store
        .writer(passphrase)
        .encryption_iterations(2048)
        .mac_iterations(2048)
        .write()
        .unwrap()
}

#[test]
fn test_key_pair_from_pem_files_roundtrip() {
    let dir = tempdir().unwrap();
    let source = recipient_keys();
    let private_key = source.private_key().unwrap();

    let public_path = write(
        dir.path(),
        "recipient.pub.pem",
        source
            .public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap()
            .as_bytes(),
    );
    let private_path = write(
        dir.path(),
        "recipient.pem",
        private_key.to_pkcs1_pem(LineEnding::LF).unwrap().as_bytes(),
    );

    let keys = KeyPair::from_files(&public_path, Some(&private_path), None).unwrap();
    let config = CipherConfiguration::default();
    let codec = EnvelopeCodec::new(&config).unwrap();

    let envelope = codec.encrypt_str("hello world", keys.public_key()).unwrap();
    assert_eq!(codec.decrypt_to_string(&envelope, &keys).unwrap(), "hello world");
    // 用文件加载的密钥也能解密原密钥对加密的数据
    let envelope = codec.encrypt(b"cross", source.public_key()).unwrap();
    assert_eq!(codec.decrypt(&envelope, &keys).unwrap(), b"cross");
}

#[test]
fn test_public_only_key_pair_from_file() {
    let dir = tempdir().unwrap();
    let source = recipient_keys();
    let public_path = write(
        dir.path(),
        "recipient.pub.der",
        source.public_key().to_public_key_der().unwrap().as_bytes(),
    );

    let keys = KeyPair::from_files(&public_path, None::<&Path>, None).unwrap();
    assert!(!keys.has_private_key());

    let config = CipherConfiguration::default();
    let codec = EnvelopeCodec::new(&config).unwrap();
    let envelope = codec.encrypt(b"data", keys.public_key()).unwrap();
    assert!(matches!(
        codec.decrypt(&envelope, &keys),
        Err(Error::MissingPrivateKey)
    ));
    assert_eq!(codec.decrypt(&envelope, source).unwrap(), b"data");
}

#[test]
fn test_encrypted_private_key_file() {
    let dir = tempdir().unwrap();
    let private_key = recipient_keys().private_key().unwrap();
    let pem = private_key
        .to_pkcs8_encrypted_pem(&mut RsaOsRng, PASSPHRASE, LineEnding::LF)
        .unwrap();
    let path = write(dir.path(), "recipient.enc.pem", pem.as_bytes());

    let good = SecretString::new(PASSPHRASE.into());
    let loaded = key_store::load_private_key_file(&path, Some(&good)).unwrap();
    assert_eq!(&loaded, private_key);

    let wrong = SecretString::new("not-the-password".into());
    assert!(matches!(
        key_store::load_private_key_file(&path, Some(&wrong)),
        Err(KeyStoreError::WrongPassphrase)
    ));
}

#[test]
fn test_wrong_passphrase_surfaces_through_key_pair() {
    let dir = tempdir().unwrap();
    let source = recipient_keys();
    let private_key = source.private_key().unwrap();
    let public_path = write(
        dir.path(),
        "recipient.pub.pem",
        source
            .public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap()
            .as_bytes(),
    );
    let private_path = write(
        dir.path(),
        "recipient.enc.pem",
        private_key
            .to_pkcs8_encrypted_pem(&mut RsaOsRng, PASSPHRASE, LineEnding::LF)
            .unwrap()
            .as_bytes(),
    );

    let wrong = SecretString::new("guess".into());
    let result = KeyPair::from_files(&public_path, Some(&private_path), Some(&wrong));
    assert!(matches!(
        result,
        Err(Error::KeyStore(KeyStoreError::WrongPassphrase))
    ));
}

#[test]
fn test_mismatched_private_key_rejected() {
    let dir = tempdir().unwrap();
    let public_path = write(
        dir.path(),
        "recipient.pub.pem",
        recipient_keys()
            .public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap()
            .as_bytes(),
    );
    let stranger = common::stranger_keys().private_key().unwrap();
    let private_path = write(
        dir.path(),
        "stranger.pem",
        stranger.to_pkcs8_pem(LineEnding::LF).unwrap().as_bytes(),
    );

    assert!(matches!(
        KeyPair::from_files(&public_path, Some(&private_path), None),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_unreadable_and_unsupported_files() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.pem");
    assert!(matches!(
        key_store::load_public_key_file(&missing),
        Err(KeyStoreError::UnreadableFile(_))
    ));

    let junk = write(
        dir.path(),
        "junk.pem",
        b"-----BEGIN X509 CRL-----\nMAMCAQA=\n-----END X509 CRL-----\n",
    );
    assert!(matches!(
        key_store::load_public_key_file(&junk),
        Err(KeyStoreError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_certificate_and_pkcs12_roundtrip() {
    let dir = tempdir().unwrap();
    let source = recipient_keys();
    let private_key = source.private_key().unwrap();
    let certificate = self_signed_certificate(private_key);

    let cert_pem = write(
        dir.path(),
        "recipient.crt",
        certificate.to_pem(LineEnding::LF).unwrap().as_bytes(),
    );
    let cert_der = write(dir.path(), "recipient.cer", &certificate.to_der().unwrap());
    let p12 = write(
        dir.path(),
        "recipient.p12",
        &pkcs12_bytes(private_key, PASSPHRASE),
    );
    let good = SecretString::new(PASSPHRASE.into());

    for cert_path in [&cert_pem, &cert_der] {
        let keys = KeyPair::from_files(cert_path, Some(&p12), Some(&good)).unwrap();
        assert_eq!(keys.public_key(), source.public_key());

        let config = CipherConfiguration::default();
        let codec = EnvelopeCodec::new(&config).unwrap();
        let envelope = codec.encrypt_str("hello world", keys.public_key()).unwrap();
        assert_eq!(codec.decrypt_to_string(&envelope, source).unwrap(), "hello world");
        assert_eq!(codec.decrypt_to_string(&envelope, &keys).unwrap(), "hello world");
    }

    let keys = KeyPair::from_pkcs12_file(&p12, &good).unwrap();
    assert_eq!(keys.private_key().unwrap(), private_key);

    let wrong = SecretString::new("guess".into());
    assert!(matches!(
        key_store::load_pkcs12_file(&p12, &wrong),
        Err(KeyStoreError::WrongPassphrase)
    ));
    assert!(matches!(
        KeyPair::from_files(&cert_pem, Some(&p12), Some(&wrong)),
        Err(Error::KeyStore(KeyStoreError::WrongPassphrase))
    ));
}
