//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::env;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use encoding_rs::GBK;
use westcn_dns_provider::{
    DnsProvider, DnsRecord, HttpTransport, ProviderCredentials, ProviderError, RecordData,
    Result, SignedRequest, WestcnProvider, WestcnProviderBuilder, create_provider,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ============ Mock Transport ============

/// 内存传输层：按 action 排队预设响应，并记录收到的每个请求
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<Result<Vec<u8>>>>>,
    requests: Mutex<Vec<SignedRequest>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 每个请求在返回前挂起指定时间
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    /// 预设 JSON 响应（以 GBK 编码返回）
    pub fn respond(&self, action: &str, json: &str) {
        let (bytes, _, had_errors) = GBK.encode(json);
        assert!(!had_errors, "fixture is not representable in GBK: {json}");
        self.respond_raw(action, bytes.into_owned());
    }

    /// 预设原始字节响应
    pub fn respond_raw(&self, action: &str, body: Vec<u8>) {
        self.push(action, Ok(body));
    }

    /// 预设传输层错误
    pub fn fail(&self, action: &str, error: ProviderError) {
        self.push(action, Err(error));
    }

    fn push(&self, action: &str, response: Result<Vec<u8>>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses
                .entry(action.to_string())
                .or_default()
                .push_back(response);
        }
    }

    /// 已收到的请求（按顺序）
    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// 已收到请求的 action 序列
    pub fn actions(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.action).collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_form(&self, request: &SignedRequest) -> Result<Vec<u8>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut r| r.get_mut(&request.action).and_then(VecDeque::pop_front));

        next.unwrap_or_else(|| {
            Err(ProviderError::NetworkError {
                provider: "mock".to_string(),
                detail: format!("no response queued for {}", request.action),
            })
        })
    }
}

/// 解码表单请求体（GBK + urlencode）为键值对
pub fn form_fields(request: &SignedRequest) -> BTreeMap<String, String> {
    request
        .body
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (decode_component(k), decode_component(v)))
        .collect()
}

fn decode_component(raw: &str) -> String {
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    let (text, _, _) = GBK.decode(&bytes);
    text.into_owned()
}

/// 使用 mock 传输层构建 Provider
pub fn mock_provider(transport: &Arc<MockTransport>) -> WestcnProvider {
    build_provider(mock_builder(transport))
}

/// 已接入 mock 传输层的 Builder，供需要额外配置的测试使用
pub fn mock_builder(transport: &Arc<MockTransport>) -> WestcnProviderBuilder {
    WestcnProvider::builder("testuser".to_string(), "testpass".to_string())
        .transport(transport.clone())
}

pub fn build_provider(builder: WestcnProviderBuilder) -> WestcnProvider {
    match builder.build() {
        Ok(provider) => provider,
        Err(e) => panic!("failed to build provider: {e}"),
    }
}

// ============ JSON 响应构造 ============

pub fn ok_json(data: &str) -> String {
    format!(r#"{{"result":200,"clientid":"c-1","msg":"","errcode":0,"data":{data}}}"#)
}

pub fn error_json(errcode: i64, msg: &str) -> String {
    format!(r#"{{"result":500,"clientid":"c-1","msg":"{msg}","errcode":{errcode}}}"#)
}

pub fn list_json(items: &[String]) -> String {
    ok_json(&format!(
        r#"{{"items":[{}],"total":{}}}"#,
        items.join(","),
        items.len()
    ))
}

pub fn item_json(id: u64, item: &str, record_type: &str, value: &str, level: i64) -> String {
    format!(
        r#"{{"id":{id},"item":"{item}","type":"{record_type}","value":"{value}","ttl":600,"level":{level}}}"#
    )
}

// ============ 记录构造 ============

pub fn a_record(name: &str, address: &str) -> DnsRecord {
    DnsRecord {
        name: name.to_string(),
        ttl: Duration::from_secs(600),
        data: RecordData::A {
            address: address.to_string(),
        },
    }
}

pub fn mx_record(name: &str, priority: u16, exchange: &str) -> DnsRecord {
    DnsRecord {
        name: name.to_string(),
        ttl: Duration::from_secs(600),
        data: RecordData::MX {
            priority,
            exchange: exchange.to_string(),
        },
    }
}

pub fn txt_record(name: &str, text: &str) -> DnsRecord {
    DnsRecord {
        name: name.to_string(),
        ttl: Duration::from_secs(600),
        data: RecordData::TXT {
            text: text.to_string(),
        },
    }
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

// ============ 真实环境 ============

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub domain: String,
}

impl TestContext {
    /// 从 `WESTCN_USERNAME` / `WESTCN_API_PASSWORD` / `TEST_DOMAIN` 创建测试上下文
    pub fn westcn() -> Option<Self> {
        let username = env::var("WESTCN_USERNAME").ok()?;
        let api_password = env::var("WESTCN_API_PASSWORD").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let credentials = ProviderCredentials::Westcn {
            username,
            api_password,
        };
        let provider = create_provider(credentials).ok()?;

        Some(Self { provider, domain })
    }
}
