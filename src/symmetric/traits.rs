use crate::common::config::BlockPadding;
use crate::common::errors::Error;

/// 对称加密系统的公共特征
///
/// 每个实现对应一种算法与工作模式的组合。密钥和 IV 由调用方提供，
/// 实现只负责校验长度并执行加解密。
pub trait SymmetricCryptographicSystem {
    /// 密钥的期望长度（以字节为单位）。
    const KEY_SIZE: usize;

    /// IV（或 nonce）的期望长度（以字节为单位）。
    const IV_SIZE: usize;

    /// 块长度（以字节为单位），流式算法为 1。
    const BLOCK_SIZE: usize;

    /// 使用密钥和 IV 加密数据。失败时不返回任何部分输出。
    fn encrypt(
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
        padding: BlockPadding,
    ) -> Result<Vec<u8>, Error>;

    /// 使用密钥和 IV 解密数据。
    ///
    /// 所有密码学失败都映射为同一个 `Error::DecryptionFailure`。
    fn decrypt(
        key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
        padding: BlockPadding,
    ) -> Result<Vec<u8>, Error>;

    /// 校验密钥与 IV 的长度
    fn check_lengths(key: &[u8], iv: &[u8]) -> Result<(), Error> {
        if key.len() != Self::KEY_SIZE {
            return Err(Error::length_mismatch("key", Self::KEY_SIZE, key.len()));
        }
        if iv.len() != Self::IV_SIZE {
            return Err(Error::length_mismatch("IV", Self::IV_SIZE, iv.len()));
        }
        Ok(())
    }
}
