use async_trait::async_trait;

use crate::error::Result;
use crate::http_client::SignedRequest;
use crate::types::DnsRecord;

/// 读取区域内全部记录
#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// 获取区域 `zone` 的全部记录
    async fn get_records(&self, zone: &str) -> Result<Vec<DnsRecord>>;
}

/// 追加记录（不检查同名记录是否已存在）
#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// 逐条新增记录，返回服务端实际保存的记录
    async fn append_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>>;
}

/// 设置记录：存在则替换，不存在则新增
#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// 逐条设置记录，返回设置后的记录
    ///
    /// 批次内不保证原子性：中途失败时，之前已处理的记录保持已修改状态。
    async fn set_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>>;
}

/// 删除记录
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// 逐条删除匹配的记录，返回已删除的记录
    async fn delete_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>>;
}

/// DNS 提供商 Trait
///
/// 聚合四个记录操作 trait，便于以 `Arc<dyn DnsProvider>` 形式传递。
pub trait DnsProvider: RecordGetter + RecordAppender + RecordSetter + RecordDeleter {
    /// 提供商标识符
    fn id(&self) -> &'static str;
}

/// HTTP 传输层 Trait
///
/// 发送已签名的表单请求，返回未解码的原始响应体。
/// 默认实现为 [`ReqwestTransport`](crate::ReqwestTransport)；测试中可替换为内存实现。
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST 表单请求
    async fn post_form(&self, request: &SignedRequest) -> Result<Vec<u8>>;
}
