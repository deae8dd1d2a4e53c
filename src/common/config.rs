//!
//! # 通用配置模块
//!
//! `CipherConfiguration` 描述一次信封加解密所使用的全部参数：
//! 对称算法、块填充、密钥/块/IV 长度、RSA 填充与密钥位数，以及字符串载荷的文本编码。
//! 配置构造一次后以不可变引用传入每个操作。
//!
use crate::common::encoding::TextEncoding;
use crate::common::errors::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "TRANSIT_SEAL_";

/// 载荷使用的对称加密算法（含工作模式）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymmetricAlgorithm {
    #[serde(rename = "aes-128-cbc")]
    Aes128Cbc,
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[cfg(feature = "chacha")]
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

impl SymmetricAlgorithm {
    /// 算法要求的密钥长度（字节）
    pub fn key_size(self) -> usize {
        match self {
            SymmetricAlgorithm::Aes128Cbc => 16,
            SymmetricAlgorithm::Aes256Cbc | SymmetricAlgorithm::Aes256Gcm => 32,
            #[cfg(feature = "chacha")]
            SymmetricAlgorithm::ChaCha20Poly1305 => 32,
        }
    }

    /// 算法的块长度（字节）。流式 AEAD 的块长度为 1。
    pub fn block_size(self) -> usize {
        match self {
            SymmetricAlgorithm::Aes128Cbc
            | SymmetricAlgorithm::Aes256Cbc
            | SymmetricAlgorithm::Aes256Gcm => 16,
            #[cfg(feature = "chacha")]
            SymmetricAlgorithm::ChaCha20Poly1305 => 1,
        }
    }

    /// 算法要求的 IV（或 nonce）长度（字节）
    pub fn iv_size(self) -> usize {
        match self {
            SymmetricAlgorithm::Aes128Cbc | SymmetricAlgorithm::Aes256Cbc => 16,
            SymmetricAlgorithm::Aes256Gcm => 12,
            #[cfg(feature = "chacha")]
            SymmetricAlgorithm::ChaCha20Poly1305 => 12,
        }
    }

    /// 是否为需要块填充的分组模式
    pub fn is_block_mode(self) -> bool {
        matches!(
            self,
            SymmetricAlgorithm::Aes128Cbc | SymmetricAlgorithm::Aes256Cbc
        )
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "aes-128-cbc" | "aes128cbc" => Some(SymmetricAlgorithm::Aes128Cbc),
            "aes-256-cbc" | "aes256cbc" => Some(SymmetricAlgorithm::Aes256Cbc),
            "aes-256-gcm" | "aes256gcm" => Some(SymmetricAlgorithm::Aes256Gcm),
            #[cfg(feature = "chacha")]
            "chacha20-poly1305" | "chacha20poly1305" => Some(SymmetricAlgorithm::ChaCha20Poly1305),
            _ => None,
        }
    }
}

/// 分组模式下的明文填充
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockPadding {
    #[default]
    Pkcs7,
    /// 不填充，明文长度必须是块长度的整数倍
    NoPadding,
}

/// RSA 封装对称密钥时使用的填充方案
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RsaPadding {
    #[default]
    Pkcs1v15,
    OaepSha256,
}

impl RsaPadding {
    /// 填充带来的字节开销
    pub fn overhead(self) -> usize {
        match self {
            RsaPadding::Pkcs1v15 => 11,
            // 2 * hLen + 2, SHA-256 的 hLen 为 32
            RsaPadding::OaepSha256 => 66,
        }
    }
}

/// 信封加密配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CipherConfiguration {
    /// 载荷加密算法
    pub algorithm: SymmetricAlgorithm,
    /// 分组模式的填充方式
    pub padding: BlockPadding,
    /// 生成的对称密钥长度（字节）
    pub key_size: usize,
    /// 载荷加密算法的块长度（字节）
    pub block_size: usize,
    /// 生成的 IV 长度（字节）
    pub iv_size: usize,
    /// RSA 填充方案
    pub rsa_padding: RsaPadding,
    /// RSA 密钥位数
    pub rsa_key_bits: usize,
    /// 字符串载荷的文本编码
    pub text_encoding: TextEncoding,
}

impl Default for CipherConfiguration {
    fn default() -> Self {
        Self::for_algorithm(SymmetricAlgorithm::Aes256Gcm)
    }
}

impl CipherConfiguration {
    /// 以算法要求的长度构造配置，其余字段取默认值
    pub fn for_algorithm(algorithm: SymmetricAlgorithm) -> Self {
        Self {
            algorithm,
            padding: BlockPadding::Pkcs7,
            key_size: algorithm.key_size(),
            block_size: algorithm.block_size(),
            iv_size: algorithm.iv_size(),
            rsa_padding: RsaPadding::Pkcs1v15,
            rsa_key_bits: 2048,
            text_encoding: TextEncoding::Utf8,
        }
    }

    /// 校验密钥、块与 IV 长度是否与所选算法一致。
    ///
    /// AEAD 算法没有块填充，只接受默认的 `Pkcs7` 取值。
    pub fn validate(&self) -> Result<(), Error> {
        let alg = self.algorithm;
        if !alg.is_block_mode() && self.padding != BlockPadding::Pkcs7 {
            return Err(Error::Configuration(format!(
                "block padding {:?} applies only to CBC modes, not {alg:?}",
                self.padding
            )));
        }
        if self.key_size != alg.key_size() {
            return Err(Error::length_mismatch("key", alg.key_size(), self.key_size));
        }
        if self.block_size != alg.block_size() {
            return Err(Error::length_mismatch("block", alg.block_size(), self.block_size));
        }
        if self.iv_size != alg.iv_size() {
            return Err(Error::length_mismatch("IV", alg.iv_size(), self.iv_size));
        }
        if self.rsa_key_bits < 1024 || self.rsa_key_bits % 8 != 0 {
            return Err(Error::Configuration(format!(
                "unsupported RSA key size: {} bits",
                self.rsa_key_bits
            )));
        }
        Ok(())
    }

    /// 从 JSON 字符串解析配置，缺省字段取默认值
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// 以默认配置为基础，应用 `TRANSIT_SEAL_*` 环境变量
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// 用环境变量覆盖当前配置。
    ///
    /// 修改算法时会同步修改密钥、块与 IV 长度，除非同时显式设置了对应变量。
    pub fn apply_env(&mut self) -> Result<(), Error> {
        self.apply_vars(|name| std::env::var(format!("{ENV_PREFIX}{name}")).ok())
    }

    fn apply_vars<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("ALGORITHM") {
            let algorithm = SymmetricAlgorithm::parse(&value).ok_or_else(|| {
                Error::Configuration(format!("unknown symmetric algorithm: {value}"))
            })?;
            self.algorithm = algorithm;
            self.key_size = algorithm.key_size();
            self.block_size = algorithm.block_size();
            self.iv_size = algorithm.iv_size();
        }

        if let Some(value) = lookup("PADDING") {
            self.padding = match value.to_ascii_lowercase().as_str() {
                "pkcs7" => BlockPadding::Pkcs7,
                "none" | "no-padding" => BlockPadding::NoPadding,
                _ => return Err(Error::Configuration(format!("unknown block padding: {value}"))),
            };
        }

        if let Some(value) = lookup("KEY_SIZE") {
            self.key_size = parse_usize("KEY_SIZE", &value)?;
        }
        if let Some(value) = lookup("IV_SIZE") {
            self.iv_size = parse_usize("IV_SIZE", &value)?;
        }

        if let Some(value) = lookup("RSA_PADDING") {
            self.rsa_padding = match value.to_ascii_lowercase().as_str() {
                "pkcs1" | "pkcs1v15" => RsaPadding::Pkcs1v15,
                "oaep" | "oaep-sha256" => RsaPadding::OaepSha256,
                _ => return Err(Error::Configuration(format!("unknown RSA padding: {value}"))),
            };
        }

        if let Some(value) = lookup("RSA_BITS") {
            self.rsa_key_bits = parse_usize("RSA_BITS", &value)?;
        }

        if let Some(value) = lookup("TEXT_ENCODING") {
            self.text_encoding = match value.to_ascii_lowercase().as_str() {
                "utf-8" | "utf8" => TextEncoding::Utf8,
                "utf-16le" | "utf16le" => TextEncoding::Utf16Le,
                "utf-16be" | "utf16be" => TextEncoding::Utf16Be,
                "ascii" => TextEncoding::Ascii,
                "latin1" | "iso-8859-1" => TextEncoding::Latin1,
                _ => return Err(Error::Configuration(format!("unknown text encoding: {value}"))),
            };
        }

        self.validate()
    }
}

fn parse_usize(name: &str, value: &str) -> Result<usize, Error> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::Configuration(format!("{ENV_PREFIX}{name} is not a number: {value}")))
}
