//! Subcommand implementations.

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use westcn_dns_provider::{
    DnsRecord, ProviderError, RecordAppender, RecordDeleter, RecordGetter, RecordSetter, Rr, WestcnProvider,
};

/// A single record given on the command line.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Zone, e.g. `example.com`
    pub zone: String,

    /// Record name relative to the zone (`@` for apex)
    pub name: String,

    /// Record type: A, AAAA, CNAME, MX, TXT, NS, SRV, CAA; other types are sent verbatim
    #[arg(value_name = "TYPE")]
    pub record_type: String,

    /// Record data; MX takes `"<priority> <exchange>"`
    pub data: String,

    /// TTL in seconds
    #[arg(long, default_value_t = 600)]
    pub ttl: u64,
}

impl RecordArgs {
    fn record(&self) -> anyhow::Result<DnsRecord> {
        let rr = Rr {
            name: self.name.clone(),
            ttl: Duration::from_secs(self.ttl),
            record_type: self.record_type.clone(),
            data: self.data.clone(),
        };
        rr.parse("westcn")
            .with_context(|| format!("invalid record {} {}", self.name, self.record_type))
    }
}

pub async fn get(provider: &WestcnProvider, zone: &str) -> anyhow::Result<Vec<DnsRecord>> {
    provider
        .get_records(zone)
        .await
        .with_context(|| format!("failed to list records of {zone}"))
}

pub async fn append(provider: &WestcnProvider, args: &RecordArgs) -> anyhow::Result<Vec<DnsRecord>> {
    let record = args.record()?;
    provider
        .append_records(&args.zone, &[record])
        .await
        .context("failed to append record")
}

pub async fn set(provider: &WestcnProvider, args: &RecordArgs) -> anyhow::Result<Vec<DnsRecord>> {
    let record = args.record()?;
    provider
        .set_records(&args.zone, &[record])
        .await
        .context("failed to set record")
}

pub async fn delete(provider: &WestcnProvider, args: &RecordArgs) -> anyhow::Result<Vec<DnsRecord>> {
    let record = args.record()?;
    provider
        .delete_records(&args.zone, &[record])
        .await
        .context("failed to delete record")
}

pub fn print_records(records: &[DnsRecord], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    for record in records {
        let rr = record.rr();
        println!(
            "{}\t{}\t{}\t{}",
            rr.name,
            rr.ttl.as_secs(),
            rr.record_type,
            rr.data
        );
    }
    Ok(())
}

/// 错误链中的 [`ProviderError`] 是否为预期错误，用于选择日志级别
pub fn is_expected(err: &anyhow::Error) -> bool {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ProviderError>())
        .is_some_and(ProviderError::is_expected)
}
