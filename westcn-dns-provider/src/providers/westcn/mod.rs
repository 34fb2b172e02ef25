//! 西部数码 (west.cn) Provider

mod client;
mod codec;
mod convert;
mod http;
mod provider;
mod sign;
mod types;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::{ProviderError, Result};
use crate::http_client::ReqwestTransport;
use crate::traits::HttpTransport;

pub(crate) use client::WestcnClient;
pub(crate) use codec::LegacyCodec;
pub(crate) use types::{ApiResponse, RecordId, RecordList, WestcnRecord};

pub(crate) const WESTCN_API_ENDPOINT: &str = "https://api.west.cn/api/v2";
pub(crate) const WESTCN_PROVIDER: &str = "westcn";
/// `getdnsrecord` 单次返回的最大记录数（接口不分页）
pub(crate) const MAX_LIST_LIMIT: u32 = 1000;
/// 未指定 TTL 时使用的默认值（秒）
pub(crate) const DEFAULT_TTL: i64 = 600;
/// 未指定优先级时使用的默认值
pub(crate) const DEFAULT_LEVEL: i64 = 10;
/// 接口成功时 `result` 字段的取值
pub(crate) const SUCCESS_RESULT: i64 = 200;

/// 西部数码 Provider
pub struct WestcnProvider {
    pub(crate) client: WestcnClient,
}

/// 西部数码 Provider Builder
pub struct WestcnProviderBuilder {
    username: String,
    api_password: String,
    endpoint: String,
    max_retries: u32,
    transport: Option<Arc<dyn HttpTransport>>,
    cancellation_token: Option<CancellationToken>,
}

impl WestcnProviderBuilder {
    fn new(username: String, api_password: String) -> Self {
        Self {
            username,
            api_password,
            endpoint: WESTCN_API_ENDPOINT.to_string(),
            max_retries: 0,
            transport: None,
            cancellation_token: None,
        }
    }

    /// 覆盖 API 地址（默认 `https://api.west.cn/api/v2`）
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// 传输层重试次数，仅对默认传输层生效
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// 使用自定义传输层
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// 取消令牌：触发后进行中的请求以 [`ProviderError::Cancelled`] 结束
    ///
    /// 令牌由该 provider 的所有调用共享。令牌一旦触发，之后的每次调用都会
    /// 直接返回 [`ProviderError::Cancelled`]。需要单独取消某一组调用时，
    /// 使用 [`WestcnProvider::with_cancellation`] 派生一个 provider。
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn build(self) -> Result<WestcnProvider> {
        let username = required(self.username, "username")?;
        let api_password = required(self.api_password, "api_password")?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.max_retries)?),
        };

        Ok(WestcnProvider {
            client: WestcnClient {
                username,
                api_password,
                endpoint: self.endpoint,
                codec: LegacyCodec::default(),
                transport,
                cancellation: self.cancellation_token,
            },
        })
    }
}

fn required(value: String, field: &str) -> Result<String> {
    if value.trim().is_empty() {
        Err(ProviderError::MissingCredential {
            provider: WESTCN_PROVIDER.to_string(),
            field: field.to_string(),
        })
    } else {
        Ok(value)
    }
}

impl WestcnProvider {
    pub fn new(username: String, api_password: String) -> Result<Self> {
        Self::builder(username, api_password).build()
    }

    pub fn builder(username: String, api_password: String) -> WestcnProviderBuilder {
        WestcnProviderBuilder::new(username, api_password)
    }

    /// 派生一个使用 `token` 的 provider，共享凭据与传输层
    ///
    /// 原 provider 的令牌不受影响，可按调用粒度取消。
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            client: WestcnClient {
                cancellation: Some(token),
                ..self.client.clone()
            },
        }
    }
}
