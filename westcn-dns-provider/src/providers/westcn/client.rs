//! 西部数码 API 客户端：新增、查询、删除解析记录

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::IgnoredAny;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::providers::common::normalize_domain_name;
use crate::traits::HttpTransport;

use super::{LegacyCodec, MAX_LIST_LIMIT, RecordId, RecordList, WESTCN_PROVIDER, WestcnRecord};

/// 接口分类
const CATEGORY_DOMAIN: &str = "domain";

const ACT_ADD_RECORD: &str = "adddnsrecord";
const ACT_LIST_RECORDS: &str = "getdnsrecord";
const ACT_DELETE_RECORD: &str = "deldnsrecord";

/// 西部数码 API 客户端
///
/// 构建后只读，可在多个任务间共享。
#[derive(Clone)]
pub(crate) struct WestcnClient {
    pub(crate) username: String,
    pub(crate) api_password: String,
    pub(crate) endpoint: String,
    pub(crate) codec: LegacyCodec,
    pub(crate) transport: Arc<dyn HttpTransport>,
    pub(crate) cancellation: Option<CancellationToken>,
}

impl WestcnClient {
    /// 新增解析记录，返回记录 ID
    pub(crate) async fn append_record(&self, zone: &str, record: &WestcnRecord) -> Result<u64> {
        let domain = if record.domain.is_empty() {
            normalize_domain_name(zone)
        } else {
            record.domain.clone()
        };
        let params = BTreeMap::from([
            ("domain", domain),
            ("host", record.host.clone()),
            ("type", record.record_type.clone()),
            ("value", record.value.clone()),
            ("ttl", record.ttl.to_string()),
            ("level", record.level.to_string()),
        ]);

        let data: RecordId = self
            .request(CATEGORY_DOMAIN, ACT_ADD_RECORD, params)
            .await?;
        Ok(data.id)
    }

    /// 查询域名下的解析记录
    ///
    /// 接口不分页，单次最多返回 [`MAX_LIST_LIMIT`] 条。
    pub(crate) async fn list_records(&self, zone: &str) -> Result<Vec<WestcnRecord>> {
        let params = BTreeMap::from([
            ("domain", normalize_domain_name(zone)),
            ("limit", MAX_LIST_LIMIT.to_string()),
        ]);

        let data: Option<RecordList> = self
            .request(CATEGORY_DOMAIN, ACT_LIST_RECORDS, params)
            .await?;
        let data = data.unwrap_or_default();

        if let Some(total) = data.total
            && total > data.items.len() as u64
        {
            log::warn!(
                "[{WESTCN_PROVIDER}] Zone {zone} reports {total} records but only {} were returned (limit {MAX_LIST_LIMIT})",
                data.items.len()
            );
        }

        Ok(data.items)
    }

    /// 删除解析记录
    pub(crate) async fn delete_record(&self, zone: &str, id: u64) -> Result<()> {
        let params = BTreeMap::from([
            ("domain", normalize_domain_name(zone)),
            ("id", id.to_string()),
        ]);

        let _: IgnoredAny = self
            .request(CATEGORY_DOMAIN, ACT_DELETE_RECORD, params)
            .await?;
        Ok(())
    }
}
