//! 西部数码 MD5 时间戳签名

use std::collections::BTreeMap;

use chrono::Utc;
use md5::{Digest, Md5};

use crate::error::Result;
use crate::http_client::SignedRequest;

use super::{WESTCN_PROVIDER, WestcnClient};

/// `token = hex(md5(username + api_password + timestamp))`
pub(crate) fn auth_token(username: &str, api_password: &str, timestamp: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(username.as_bytes());
    hasher.update(api_password.as_bytes());
    hasher.update(timestamp.as_bytes());
    hex::encode(hasher.finalize())
}

impl WestcnClient {
    /// 以当前时间构建签名请求
    pub(crate) fn build_request(
        &self,
        category: &str,
        action: &str,
        params: BTreeMap<&'static str, String>,
    ) -> Result<SignedRequest> {
        let timestamp = Utc::now().timestamp_millis().to_string();
        self.build_request_at(category, action, params, &timestamp)
    }

    /// 以指定时间戳（毫秒）构建签名请求
    pub(crate) fn build_request_at(
        &self,
        category: &str,
        action: &str,
        mut params: BTreeMap<&'static str, String>,
        timestamp: &str,
    ) -> Result<SignedRequest> {
        params.insert("username", self.username.clone());
        params.insert("time", timestamp.to_string());
        params.insert(
            "token",
            auth_token(&self.username, &self.api_password, timestamp),
        );

        // 键和值先转 GBK 再做 urlencode
        let mut pairs = Vec::with_capacity(params.len());
        for (key, value) in &params {
            let key = urlencoding::encode_binary(&self.codec.encode(key)?).into_owned();
            let value = urlencoding::encode_binary(&self.codec.encode(value)?).into_owned();
            pairs.push(format!("{key}={value}"));
        }

        let url = format!(
            "{}/{}/?act={}",
            self.endpoint.trim_end_matches('/'),
            category.trim_matches('/'),
            urlencoding::encode(action)
        );

        Ok(SignedRequest {
            provider: WESTCN_PROVIDER,
            action: action.to_string(),
            url,
            headers: vec![(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )],
            body: pairs.join("&"),
        })
    }
}
