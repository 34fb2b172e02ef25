//! 西部数码 API 类型定义

use serde::{Deserialize, Deserializer, Serialize};

use super::SUCCESS_RESULT;

// ============ 响应结构 ============

/// 通用响应信封
///
/// `data` 的结构随接口不同而不同，失败时通常缺失。
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(deserialize_with = "lenient_i64")]
    pub result: i64,
    #[serde(rename = "clientid", default)]
    pub client_id: Option<String>,
    #[serde(rename = "msg", default)]
    pub message: String,
    #[serde(rename = "errcode", default, deserialize_with = "lenient_i64")]
    pub error_code: i64,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.result == SUCCESS_RESULT
    }
}

/// `adddnsrecord` 返回数据
#[derive(Debug, Deserialize)]
pub struct RecordId {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
}

/// `getdnsrecord` 返回数据
#[derive(Debug, Default, Deserialize)]
pub struct RecordList {
    #[serde(default)]
    pub items: Vec<WestcnRecord>,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub total: Option<u64>,
}

// ============ 记录结构 ============

/// 西部数码解析记录
///
/// 查询接口以 `item` 返回主机名，新增接口以 `host` 提交主机名，两者含义相同。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WestcnRecord {
    /// 记录 ID（仅查询结果中存在）
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub id: Option<u64>,
    /// 所属域名（仅提交时使用）
    #[serde(default, skip_serializing)]
    pub domain: String,
    /// 主机名（查询结果）
    #[serde(default)]
    pub item: String,
    /// 主机名（提交字段）
    #[serde(default)]
    pub host: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub value: String,
    /// TTL（秒）
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ttl: i64,
    /// 优先级（MX）
    #[serde(default, deserialize_with = "lenient_i64")]
    pub level: i64,
}

// ============ 宽松数值解析 ============
// 接口中的数值字段时而为数字、时而为字符串

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    I64(i64),
    U64(u64),
    String(String),
    Null(()),
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match LenientNumber::deserialize(deserializer)? {
        LenientNumber::I64(n) => Ok(n),
        LenientNumber::U64(n) => i64::try_from(n).map_err(Error::custom),
        LenientNumber::String(s) if s.trim().is_empty() => Ok(0),
        LenientNumber::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| Error::custom(format!("invalid number '{s}': {e}"))),
        LenientNumber::Null(()) => Ok(0),
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    lenient_opt_u64(deserializer)?.ok_or_else(|| Error::custom("missing numeric id"))
}

fn lenient_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match LenientNumber::deserialize(deserializer)? {
        LenientNumber::I64(n) => u64::try_from(n).map(Some).map_err(Error::custom),
        LenientNumber::U64(n) => Ok(Some(n)),
        LenientNumber::String(s) if s.trim().is_empty() => Ok(None),
        LenientNumber::String(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| Error::custom(format!("invalid number '{s}': {e}"))),
        LenientNumber::Null(()) => Ok(None),
    }
}
