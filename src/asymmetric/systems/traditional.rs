//! # Traditional Cryptographic Algorithm Module
//!
//! This module contains the RSA key-wrapping implementation used by the envelope codec.
//!
//! ---
//!
//! # 传统加密算法模块
//!
//! 本模块包含信封编解码器使用的 RSA 密钥封装实现。

pub mod rsa;

// 重新导出RSA系统，方便其他模块调用。
pub use rsa::RsaKeyWrapper;
