//! 算法系统集合
//!
//! 目前只包含传统（RSA）密钥封装算法
pub mod traditional;
