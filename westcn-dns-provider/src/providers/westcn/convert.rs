//! 通用记录 <-> 西部数码记录 转换

use std::time::Duration;

use crate::error::{ProviderError, Result};
use crate::providers::common::{full_name_to_relative, normalize_domain_name};
use crate::types::{DnsRecord, RecordData, Rr};

use super::{DEFAULT_LEVEL, DEFAULT_TTL, WESTCN_PROVIDER, WestcnRecord};

impl WestcnRecord {
    /// 主机名：优先 `item`，为空时回退到 `host`
    pub(crate) fn host_name(&self) -> &str {
        if self.item.is_empty() {
            &self.host
        } else {
            &self.item
        }
    }

    /// 相对区域的记录名，空主机名视为 `"@"`
    pub(crate) fn relative_name(&self, zone: &str) -> String {
        full_name_to_relative(self.host_name(), zone)
    }
}

/// 西部数码记录 -> 通用记录
///
/// MX 的优先级保存在 `level` 中，转换时拼回 `"<priority> <exchange>"`。
pub(crate) fn to_generic(record: &WestcnRecord, zone: &str) -> Result<DnsRecord> {
    let name = record.relative_name(zone);

    let data = if record.record_type.eq_ignore_ascii_case("MX") {
        format!("{} {}", record.level, record.value)
    } else {
        record.value.clone()
    };

    let ttl = u64::try_from(record.ttl).map_err(|_| ProviderError::InvalidRecord {
        provider: WESTCN_PROVIDER.to_string(),
        detail: format!("negative TTL {} for '{name}'", record.ttl),
    })?;

    Rr {
        name,
        ttl: Duration::from_secs(ttl),
        record_type: record.record_type.clone(),
        data,
    }
    .parse(WESTCN_PROVIDER)
}

/// 通用记录 -> 西部数码记录
///
/// TTL 为 0 时取 600，优先级为 0 时取 10。
pub(crate) fn to_native(zone: &str, record: &DnsRecord) -> WestcnRecord {
    let rr = record.rr();

    let (value, level) = match &record.data {
        RecordData::MX { priority, exchange } => (exchange.clone(), i64::from(*priority)),
        _ => (rr.data, 0),
    };

    let ttl = i64::try_from(rr.ttl.as_secs()).unwrap_or(i64::MAX);

    WestcnRecord {
        id: None,
        domain: normalize_domain_name(zone),
        item: String::new(),
        host: full_name_to_relative(&rr.name, zone),
        record_type: rr.record_type,
        value,
        ttl: if ttl <= 0 { DEFAULT_TTL } else { ttl },
        level: if level <= 0 { DEFAULT_LEVEL } else { level },
    }
}
