//! 西部数码 HTTP 请求方法

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, SignedRequest};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{ApiResponse, WESTCN_PROVIDER, WestcnClient};

impl WestcnClient {
    /// 执行西部数码 API 请求
    ///
    /// 签名 -> 发送 -> GBK 解码 -> 解析信封 -> 校验 `result` -> 提取 `data`
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        category: &str,
        action: &str,
        params: BTreeMap<&'static str, String>,
    ) -> Result<T> {
        // 1. 构建签名请求（每次调用重新计算时间戳与 token）
        let request = self.build_request(category, action, params)?;

        // 2. 发送请求
        let body = self.send(&request).await?;

        // 3. GBK 解码
        let text = self.codec.decode(&body)?;
        log::debug!(
            "[{WESTCN_PROVIDER}] Response Body ({action}): {}",
            truncate_for_log(&text)
        );

        // 4. 解析响应信封
        let response: ApiResponse<serde_json::Value> =
            HttpUtils::parse_json(&text, WESTCN_PROVIDER)?;

        // 5. 处理错误
        if !response.is_success() {
            log::error!(
                "[{WESTCN_PROVIDER}] API error ({action}): {} - {} (clientid: {})",
                response.error_code,
                response.message,
                response.client_id.as_deref().unwrap_or("-")
            );
            return Err(ProviderError::ApiError {
                provider: WESTCN_PROVIDER.to_string(),
                error_code: response.error_code,
                message: response.message,
            });
        }

        // 6. 提取数据
        let data = response.data.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(data).map_err(|e| {
            log::error!("[{WESTCN_PROVIDER}] Unexpected payload ({action}): {e}");
            ProviderError::DecodingError {
                provider: WESTCN_PROVIDER.to_string(),
                detail: format!("unexpected {action} payload: {e}"),
            }
        })
    }

    /// 通过传输层发送；取消令牌触发时立即返回 `Cancelled`
    async fn send(&self, request: &SignedRequest) -> Result<Vec<u8>> {
        let Some(token) = &self.cancellation else {
            return self.transport.post_form(request).await;
        };

        if token.is_cancelled() {
            return Err(cancelled());
        }

        tokio::select! {
            biased;
            () = token.cancelled() => {
                log::warn!("[{WESTCN_PROVIDER}] Request cancelled ({})", request.action);
                Err(cancelled())
            }
            result = self.transport.post_form(request) => result,
        }
    }
}

fn cancelled() -> ProviderError {
    ProviderError::Cancelled {
        provider: WESTCN_PROVIDER.to_string(),
    }
}
