//! 西部数码 Provider 记录操作实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{DnsProvider, RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
use crate::types::DnsRecord;

use super::convert::{to_generic, to_native};
use super::{WESTCN_PROVIDER, WestcnProvider, WestcnRecord};

impl WestcnProvider {
    /// 按 主机名 + 类型（+ 非空时的值）查找已有记录，返回记录 ID
    async fn find_record_id(&self, zone: &str, target: &WestcnRecord) -> Result<u64> {
        let records = self.client.list_records(zone).await?;

        let found = records.iter().find(|r| {
            r.relative_name(zone) == target.host
                && r.record_type.eq_ignore_ascii_case(&target.record_type)
                && (target.value.is_empty() || r.value == target.value)
        });

        match found {
            Some(WestcnRecord { id: Some(id), .. }) => Ok(*id),
            Some(_) => Err(ProviderError::DecodingError {
                provider: WESTCN_PROVIDER.to_string(),
                detail: format!(
                    "matched record '{}' ({}) has no id",
                    target.host, target.record_type
                ),
            }),
            None => Err(ProviderError::RecordNotFound {
                provider: WESTCN_PROVIDER.to_string(),
                name: target.host.clone(),
                record_type: target.record_type.clone(),
            }),
        }
    }

    /// 新增单条记录，并以服务端视角返回
    async fn append_one(&self, zone: &str, native: &WestcnRecord) -> Result<DnsRecord> {
        let id = self.client.append_record(zone, native).await?;
        log::debug!(
            "[{WESTCN_PROVIDER}] Added record {id}: {} {} {}",
            native.host,
            native.record_type,
            native.value
        );

        let added = WestcnRecord {
            id: Some(id),
            ..native.clone()
        };
        to_generic(&added, zone)
    }
}

#[async_trait]
impl RecordGetter for WestcnProvider {
    async fn get_records(&self, zone: &str) -> Result<Vec<DnsRecord>> {
        let records = self.client.list_records(zone).await?;
        records.iter().map(|r| to_generic(r, zone)).collect()
    }
}

#[async_trait]
impl RecordAppender for WestcnProvider {
    async fn append_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>> {
        let mut appended = Vec::with_capacity(records.len());
        for record in records {
            let native = to_native(zone, record);
            appended.push(self.append_one(zone, &native).await?);
        }
        Ok(appended)
    }
}

#[async_trait]
impl RecordSetter for WestcnProvider {
    /// 接口无修改操作：先删除匹配的旧记录，再新增
    async fn set_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>> {
        let mut set = Vec::with_capacity(records.len());
        for record in records {
            let native = to_native(zone, record);

            match self.find_record_id(zone, &native).await {
                Ok(id) => {
                    self.client.delete_record(zone, id).await?;
                    log::debug!("[{WESTCN_PROVIDER}] Replaced record {id}");
                }
                Err(ProviderError::RecordNotFound { .. }) => {}
                Err(e) => return Err(e),
            }

            set.push(self.append_one(zone, &native).await?);
        }
        Ok(set)
    }
}

#[async_trait]
impl RecordDeleter for WestcnProvider {
    async fn delete_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>> {
        let mut deleted = Vec::with_capacity(records.len());
        for record in records {
            let native = to_native(zone, record);
            let id = self.find_record_id(zone, &native).await?;
            self.client.delete_record(zone, id).await?;
            log::debug!("[{WESTCN_PROVIDER}] Deleted record {id}");
            deleted.push(record.clone());
        }
        Ok(deleted)
    }
}

impl DnsProvider for WestcnProvider {
    fn id(&self) -> &'static str {
        WESTCN_PROVIDER
    }
}
