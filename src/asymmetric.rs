//! 非对称密钥封装：RSA 密钥对句柄与对称密钥的封装/解封

pub mod keys;
pub mod systems;
pub mod traits;
pub mod wrapper;

pub use keys::KeyPair;
pub use traits::KeyWrappingSystem;
pub use wrapper::AsymmetricKeyWrapper;
