//! 通用模块，包含错误处理、配置和文本编码

pub mod config;
pub mod encoding;
pub mod errors;

pub use self::config::{BlockPadding, CipherConfiguration, RsaPadding, SymmetricAlgorithm};
pub use self::encoding::TextEncoding;
pub use self::errors::{Error, Result};
