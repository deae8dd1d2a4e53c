//! 文本编码：字符串载荷与字节之间的转换。
use crate::common::errors::Error;
use serde::{Deserialize, Serialize};

/// 字符串载荷所使用的文本编码
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "utf-16le", alias = "utf16le")]
    Utf16Le,
    #[serde(rename = "utf-16be", alias = "utf16be")]
    Utf16Be,
    Ascii,
    /// ISO-8859-1
    Latin1,
}

impl TextEncoding {
    /// 将字符串编码为字节。
    ///
    /// 字符超出编码表示范围（ASCII 或 Latin-1）时返回 `Error::Encoding`。
    pub fn encode(self, text: &str) -> Result<Vec<u8>, Error> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            TextEncoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            TextEncoding::Ascii => {
                if text.is_ascii() {
                    Ok(text.as_bytes().to_vec())
                } else {
                    Err(Error::Encoding("string contains non-ASCII characters".to_string()))
                }
            }
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| {
                        Error::Encoding(format!("character {c:?} is not representable in Latin-1"))
                    })
                })
                .collect(),
        }
    }

    /// 将字节解码为字符串。
    pub fn decode(self, bytes: &[u8]) -> Result<String, Error> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| Error::Encoding(format!("invalid UTF-8: {e}"))),
            TextEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            TextEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            TextEncoding::Ascii => {
                if bytes.is_ascii() {
                    // ASCII 是 UTF-8 的子集
                    Ok(bytes.iter().map(|&b| char::from(b)).collect())
                } else {
                    Err(Error::Encoding("bytes are not valid ASCII".to_string()))
                }
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, Error> {
    if bytes.len() % 2 != 0 {
        return Err(Error::Encoding(
            "UTF-16 input has an odd number of bytes".to_string(),
        ));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| Error::Encoding(format!("invalid UTF-16: {e}")))
}
