//! 定义了非对称密钥封装系统的核心 Trait。
use crate::common::config::CipherConfiguration;
use crate::common::errors::Error;
use zeroize::Zeroizing;

/// `KeyWrappingSystem` 定义了非对称算法在信封加密中必须实现的核心功能。
///
/// 非对称加密在这里只用于封装（加密）和解封一次性的对称密钥，
/// 从不直接处理载荷。
pub trait KeyWrappingSystem {
    /// 公钥类型
    type PublicKey;

    /// 私钥类型
    type PrivateKey;

    /// 按配置生成密钥对
    fn generate_keypair(
        config: &CipherConfiguration,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), Error>;

    /// 使用公钥封装对称密钥。
    fn wrap(
        config: &CipherConfiguration,
        public_key: &Self::PublicKey,
        symmetric_key: &[u8],
    ) -> Result<Vec<u8>, Error>;

    /// 使用私钥解封对称密钥，返回的缓冲区在释放时自动擦除。
    fn unwrap(
        config: &CipherConfiguration,
        private_key: &Self::PrivateKey,
        wrapped_key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, Error>;
}
