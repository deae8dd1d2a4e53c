use rand_core::{OsRng, TryRngCore};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::common::errors::Error;

/// 一次性对称密钥与 IV
///
/// 每次加密调用生成一个，离开作用域时（包括错误路径）自动擦除。
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricSecret {
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl SymmetricSecret {
    /// 从操作系统安全随机源生成指定长度的密钥与 IV
    pub fn generate(key_size: usize, iv_size: usize) -> Result<Self, Error> {
        // 先构造再填充，填充失败时已分配的缓冲区同样会被擦除
        let mut secret = Self {
            key: vec![0u8; key_size],
            iv: vec![0u8; iv_size],
        };
        OsRng.try_fill_bytes(&mut secret.key)?;
        OsRng.try_fill_bytes(&mut secret.iv)?;
        Ok(secret)
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

impl fmt::Debug for SymmetricSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricSecret")
            .field("key", &"[REDACTED]")
            .field("iv_len", &self.iv.len())
            .finish()
    }
}
