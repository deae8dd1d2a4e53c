#[cfg(feature = "key-store")]
use crate::key_store::KeyStoreError;
use thiserror::Error;

/// 信封加解密可能遇到的错误类型
///
/// 密码学失败被刻意保持为粗粒度：`DecryptionFailure` 不携带任何能区分
/// 填充错误、认证标签错误或长度错误的信息。
#[derive(Error, Debug)]
pub enum Error {
    #[error("secure random source unavailable: {0}")]
    RandomSource(#[from] rand_core::OsError),

    #[error("symmetric key of {key_len} bytes does not fit a {modulus_len}-byte RSA modulus with {overhead} bytes of padding overhead")]
    UnsupportedKeySize {
        key_len: usize,
        modulus_len: usize,
        overhead: usize,
    },

    #[error("encryption failed: {0}")]
    EncryptionFailure(String),

    #[error("decryption failed")]
    DecryptionFailure,

    #[error("a private key is required for decryption")]
    MissingPrivateKey,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("text encoding error: {0}")]
    Encoding(String),

    #[error("IV separator is not the inverse of the IV mixer")]
    MixerInverseMismatch,

    #[cfg(feature = "key-store")]
    #[error("key store error: {0}")]
    KeyStore(#[from] KeyStoreError),

    #[error("decoding from Base64 failed: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("serialization error (JSON): {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// 缺少 IV 与 IV 分离器时的统一错误
    pub(crate) fn missing_iv() -> Self {
        Error::Configuration("neither an explicit IV nor an IV separator was supplied".to_string())
    }

    pub(crate) fn length_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        Error::Configuration(format!(
            "{what} length mismatch: expected {expected} bytes, got {actual}"
        ))
    }
}

/// crate 内统一的 `Result` 别名
pub type Result<T, E = Error> = std::result::Result<T, E>;
