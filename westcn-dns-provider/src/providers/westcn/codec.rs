//! GBK 编解码
//!
//! 西部数码接口的请求与响应均为 GBK 编码，而非 UTF-8。

use encoding_rs::{Encoding, GBK};

use crate::error::{ProviderError, Result};

use super::WESTCN_PROVIDER;

/// 遗留字符集编解码器（默认 GBK）
#[derive(Debug, Clone, Copy)]
pub struct LegacyCodec {
    encoding: &'static Encoding,
}

impl Default for LegacyCodec {
    fn default() -> Self {
        Self { encoding: GBK }
    }
}

impl LegacyCodec {
    /// UTF-8 -> GBK；无法表示的字符返回 `EncodingError`
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            let offending = text
                .chars()
                .find(|c| {
                    let mut buf = [0u8; 4];
                    self.encoding.encode(c.encode_utf8(&mut buf)).2
                })
                .map_or_else(String::new, |c| format!("'{c}' "));
            return Err(ProviderError::EncodingError {
                provider: WESTCN_PROVIDER.to_string(),
                detail: format!("{offending}is not representable in {}", self.encoding.name()),
            });
        }
        Ok(bytes.into_owned())
    }

    /// GBK -> UTF-8；非法字节序列返回 `DecodingError`
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(std::borrow::Cow::into_owned)
            .ok_or_else(|| ProviderError::DecodingError {
                provider: WESTCN_PROVIDER.to_string(),
                detail: format!("response body is not valid {}", self.encoding.name()),
            })
    }
}
