//! # Symmetric Cryptographic Systems Module
//!
//! This module serves as a façade for all symmetric encryption algorithms supported by the crate.
//! Each system implements the `SymmetricCryptographicSystem` trait and is selected at runtime
//! by `CipherConfiguration::algorithm`.
//!
//! ---
//!
//! # 对称加密系统模块
//!
//! 本模块是 `transit-seal` 支持的所有载荷加密算法的"门面"(façade)。
//! 每个系统都实现 `SymmetricCryptographicSystem` 特征，并在运行时由
//! `CipherConfiguration::algorithm` 选择。

pub mod aes_cbc;
pub mod aes_gcm;
#[cfg(feature = "chacha")]
pub mod chacha20_poly1305;

pub use aes_cbc::{Aes128CbcSystem, Aes256CbcSystem};
pub use aes_gcm::AesGcmSystem;
#[cfg(feature = "chacha")]
pub use chacha20_poly1305::ChaCha20Poly1305System;
