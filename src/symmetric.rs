//! 对称加密：一次性密钥/IV 生成与载荷加解密

pub mod engine;
pub mod secret;
pub mod systems;
pub mod traits;

pub use engine::SymmetricCipherEngine;
pub use secret::SymmetricSecret;
pub use traits::SymmetricCryptographicSystem;
