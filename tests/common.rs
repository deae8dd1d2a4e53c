//!
//! 集成测试的通用辅助函数
//!
#![allow(dead_code)]

use std::sync::OnceLock;
use transit_seal::{CipherConfiguration, KeyPair};

/// 整个测试进程共享的收件人密钥对（2048 位 RSA）
pub fn recipient_keys() -> &'static KeyPair {
    static KEYS: OnceLock<KeyPair> = OnceLock::new();
    KEYS.get_or_init(|| KeyPair::generate(&CipherConfiguration::default()).unwrap())
}

/// 与收件人无关的另一对密钥
pub fn stranger_keys() -> &'static KeyPair {
    static KEYS: OnceLock<KeyPair> = OnceLock::new();
    KEYS.get_or_init(|| KeyPair::generate(&CipherConfiguration::default()).unwrap())
}

/// 所有可用的算法配置
pub fn all_configurations() -> Vec<CipherConfiguration> {
    use transit_seal::SymmetricAlgorithm;
    let mut configs = vec![
        CipherConfiguration::for_algorithm(SymmetricAlgorithm::Aes128Cbc),
        CipherConfiguration::for_algorithm(SymmetricAlgorithm::Aes256Cbc),
        CipherConfiguration::for_algorithm(SymmetricAlgorithm::Aes256Gcm),
    ];
    #[cfg(feature = "chacha")]
    configs.push(CipherConfiguration::for_algorithm(
        SymmetricAlgorithm::ChaCha20Poly1305,
    ));
    configs
}
