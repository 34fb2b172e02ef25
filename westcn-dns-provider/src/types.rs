use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::providers::common::{parse_record_type, record_type_to_string};

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(record_type_to_string(self))
    }
}

/// Type-safe representation of DNS record data.
///
/// Each variant carries the fields specific to that record type.
/// Use [`record_type()`](Self::record_type) to get the [`DnsRecordType`] discriminant.
/// Types outside [`DnsRecordType`] are kept verbatim in [`RecordData::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    /// A record — maps a hostname to an IPv4 address.
    A {
        /// IPv4 address (e.g., `"1.2.3.4"`).
        address: String,
    },

    /// AAAA record — maps a hostname to an IPv6 address.
    AAAA {
        /// IPv6 address (e.g., `"2001:db8::1"`).
        address: String,
    },

    /// CNAME record — alias from one name to another.
    CNAME {
        /// Target hostname.
        target: String,
    },

    /// MX record — mail exchange server.
    MX {
        /// Priority (lower = preferred).
        priority: u16,
        /// Mail server hostname.
        exchange: String,
    },

    /// TXT record — arbitrary text data.
    TXT {
        /// Text content.
        text: String,
    },

    /// NS record — authoritative name server.
    NS {
        /// Name server hostname.
        nameserver: String,
    },

    /// SRV record — service locator.
    SRV {
        /// Priority (lower = preferred).
        priority: u16,
        /// Weight for load balancing among same-priority targets.
        weight: u16,
        /// TCP/UDP port number.
        port: u16,
        /// Target hostname providing the service.
        target: String,
    },

    /// CAA record — Certificate Authority Authorization.
    CAA {
        /// Issuer critical flag (0 or 128).
        flags: u8,
        /// Property tag (`"issue"`, `"issuewild"`, or `"iodef"`).
        tag: String,
        /// CA domain or reporting URI.
        value: String,
    },

    /// 未建模的记录类型（PTR、SVCB 等），类型与数据原样保留，不做校验。
    Other {
        /// Uppercase record type (e.g., `"PTR"`).
        record_type: String,
        /// Record data in text form.
        data: String,
    },
}

impl RecordData {
    /// Returns the [`DnsRecordType`] discriminant, or `None` for [`RecordData::Other`].
    pub fn record_type(&self) -> Option<DnsRecordType> {
        match self {
            Self::A { .. } => Some(DnsRecordType::A),
            Self::AAAA { .. } => Some(DnsRecordType::Aaaa),
            Self::CNAME { .. } => Some(DnsRecordType::Cname),
            Self::MX { .. } => Some(DnsRecordType::Mx),
            Self::TXT { .. } => Some(DnsRecordType::Txt),
            Self::NS { .. } => Some(DnsRecordType::Ns),
            Self::SRV { .. } => Some(DnsRecordType::Srv),
            Self::CAA { .. } => Some(DnsRecordType::Caa),
            Self::Other { .. } => None,
        }
    }

    /// Record type as its uppercase wire name.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Other { record_type, .. } => record_type,
            typed => typed
                .record_type()
                .map_or("", |t| record_type_to_string(&t)),
        }
    }

    /// 从文本形式解析记录数据
    ///
    /// 文本格式与区域文件一致：
    /// - MX: `"<priority> <exchange>"`
    /// - SRV: `"<priority> <weight> <port> <target>"`
    /// - CAA: `"<flags> <tag> <value>"`，value 可带双引号
    /// - TXT: 原样保留
    pub fn parse(record_type: &DnsRecordType, data: &str, provider: &str) -> Result<Self> {
        let invalid = |detail: String| ProviderError::InvalidRecord {
            provider: provider.to_string(),
            detail,
        };
        let trimmed = data.trim();

        match record_type {
            DnsRecordType::A => trimmed
                .parse::<Ipv4Addr>()
                .map(|ip| Self::A {
                    address: ip.to_string(),
                })
                .map_err(|_| invalid(format!("invalid IPv4 address: '{data}'"))),
            DnsRecordType::Aaaa => trimmed
                .parse::<Ipv6Addr>()
                .map(|ip| Self::AAAA {
                    address: ip.to_string(),
                })
                .map_err(|_| invalid(format!("invalid IPv6 address: '{data}'"))),
            DnsRecordType::Cname => {
                non_empty(trimmed, "CNAME target").map_err(invalid)?;
                Ok(Self::CNAME {
                    target: trimmed.to_string(),
                })
            }
            DnsRecordType::Ns => {
                non_empty(trimmed, "NS nameserver").map_err(invalid)?;
                Ok(Self::NS {
                    nameserver: trimmed.to_string(),
                })
            }
            DnsRecordType::Txt => Ok(Self::TXT {
                text: data.to_string(),
            }),
            DnsRecordType::Mx => {
                let mut parts = trimmed.split_whitespace();
                let (Some(priority), Some(exchange), None) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(invalid(format!(
                        "MX data must be '<priority> <exchange>': '{data}'"
                    )));
                };
                Ok(Self::MX {
                    priority: parse_number(priority, "MX priority").map_err(invalid)?,
                    exchange: exchange.to_string(),
                })
            }
            DnsRecordType::Srv => {
                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                let [priority, weight, port, target] = parts.as_slice() else {
                    return Err(invalid(format!(
                        "SRV data must be '<priority> <weight> <port> <target>': '{data}'"
                    )));
                };
                Ok(Self::SRV {
                    priority: parse_number(priority, "SRV priority").map_err(invalid)?,
                    weight: parse_number(weight, "SRV weight").map_err(invalid)?,
                    port: parse_number(port, "SRV port").map_err(invalid)?,
                    target: (*target).to_string(),
                })
            }
            DnsRecordType::Caa => {
                let mut parts = trimmed.splitn(3, char::is_whitespace);
                let (Some(flags), Some(tag), Some(value)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(invalid(format!(
                        "CAA data must be '<flags> <tag> <value>': '{data}'"
                    )));
                };
                let value = value.trim().trim_matches('"');
                non_empty(value, "CAA value").map_err(invalid)?;
                Ok(Self::CAA {
                    flags: parse_number(flags, "CAA flags").map_err(invalid)?,
                    tag: tag.to_string(),
                    value: value.to_string(),
                })
            }
        }
    }

    /// 渲染为文本形式，与 [`parse()`](Self::parse) 互逆
    pub fn to_data_string(&self) -> String {
        match self {
            Self::A { address } | Self::AAAA { address } => address.clone(),
            Self::CNAME { target } => target.clone(),
            Self::NS { nameserver } => nameserver.clone(),
            Self::TXT { text } => text.clone(),
            Self::MX { priority, exchange } => format!("{priority} {exchange}"),
            Self::SRV {
                priority,
                weight,
                port,
                target,
            } => format!("{priority} {weight} {port} {target}"),
            Self::CAA { flags, tag, value } => format!("{flags} {tag} \"{value}\""),
            Self::Other { data, .. } => data.clone(),
        }
    }
}

fn non_empty(value: &str, what: &str) -> std::result::Result<(), String> {
    if value.is_empty() {
        Err(format!("{what} must not be empty"))
    } else {
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> std::result::Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("invalid {what}: '{value}'"))
}

/// A raw resource record: every field is plain text except the TTL.
///
/// This is the loosely-typed shape records take on the wire. Use
/// [`parse()`](Self::parse) to validate it into a [`DnsRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rr {
    /// Record name, relative to the zone (`"www"`, `"@"` for apex).
    pub name: String,
    /// Time to live.
    #[serde(with = "crate::utils::ttl")]
    pub ttl: Duration,
    /// Record type (`"A"`, `"MX"`, ...).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Type-specific record data in text form.
    pub data: String,
}

impl Rr {
    /// Validate the raw record into a typed [`DnsRecord`].
    ///
    /// Known types are validated strictly. Any other non-empty type becomes
    /// [`RecordData::Other`] with the data kept verbatim.
    pub fn parse(&self, provider: &str) -> Result<DnsRecord> {
        let data = match parse_record_type(&self.record_type, provider) {
            Ok(record_type) => RecordData::parse(&record_type, &self.data, provider)?,
            Err(ProviderError::UnsupportedRecordType { .. })
                if !self.record_type.trim().is_empty() =>
            {
                RecordData::Other {
                    record_type: self.record_type.trim().to_uppercase(),
                    data: self.data.clone(),
                }
            }
            Err(e) => return Err(e),
        };
        Ok(DnsRecord {
            name: self.name.clone(),
            ttl: self.ttl,
            data,
        })
    }
}

/// A typed DNS record, as exchanged with callers of the record traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record name (e.g., `"www"` or `"@"` for apex).
    pub name: String,
    /// Time to live.
    #[serde(with = "crate::utils::ttl")]
    pub ttl: Duration,
    /// Type-specific record data.
    pub data: RecordData,
}

impl DnsRecord {
    /// Render the record back into its raw [`Rr`] form.
    pub fn rr(&self) -> Rr {
        Rr {
            name: self.name.clone(),
            ttl: self.ttl,
            record_type: self.data.type_name().to_string(),
            data: self.data.to_data_string(),
        }
    }
}

// ============ Credential Types ============

/// Validation error for provider credentials.
///
/// Returned when credential fields are missing, empty, or have an invalid format.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
///
/// # Serialization
///
/// Serialized as a tagged enum with `"provider"` as the tag and `"credentials"` as the content:
///
/// ```json
/// { "provider": "westcn", "credentials": { "username": "...", "api_password": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// West.cn (西部数码) credentials.
    #[serde(rename = "westcn")]
    Westcn {
        /// West.cn account username.
        username: String,
        /// API password configured in the west.cn console (not the login password).
        api_password: String,
    },
}

impl ProviderCredentials {
    /// Construct credentials from a `HashMap`, validating required fields.
    ///
    /// Useful for deserializing credentials stored in a flat key-value format.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or empty.
    pub fn from_map(
        map: &std::collections::HashMap<String, String>,
    ) -> std::result::Result<Self, CredentialValidationError> {
        Ok(Self::Westcn {
            username: Self::get_required_field(map, "username", "Username")?,
            api_password: Self::get_required_field(map, "apiPassword", "API Password")?,
        })
    }

    /// Obtain required fields from `HashMap` and verify that it is not empty
    fn get_required_field(
        map: &std::collections::HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> std::result::Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert credentials to a `HashMap` for flat key-value storage.
    pub fn to_map(&self) -> std::collections::HashMap<String, String> {
        match self {
            Self::Westcn {
                username,
                api_password,
            } => [
                ("username".to_string(), username.clone()),
                ("apiPassword".to_string(), api_password.clone()),
            ]
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(record_type: DnsRecordType, data: &str) -> Result<RecordData> {
        RecordData::parse(&record_type, data, "test")
    }

    // ============ ProviderCredentials Round Trip Test ============

    #[test]
    fn credentials_westcn_roundtrip() {
        let map: HashMap<String, String> = [
            ("username".to_string(), "user1".to_string()),
            ("apiPassword".to_string(), "secret".to_string()),
        ]
        .into();
        let res = ProviderCredentials::from_map(&map);
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(cred) = res else {
            return;
        };
        let back = cred.to_map();
        assert_eq!(back.get("username").map(String::as_str), Some("user1"));
        assert_eq!(back.get("apiPassword").map(String::as_str), Some("secret"));
    }

    #[test]
    fn credentials_missing_field() {
        let map: HashMap<String, String> = [("username".to_string(), "user1".to_string())].into();
        let res = ProviderCredentials::from_map(&map);
        assert!(
            matches!(&res, Err(CredentialValidationError::MissingField { field, .. }) if field == "apiPassword"),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn credentials_empty_field() {
        let map: HashMap<String, String> = [
            ("username".to_string(), "  ".to_string()),
            ("apiPassword".to_string(), "secret".to_string()),
        ]
        .into();
        let res = ProviderCredentials::from_map(&map);
        assert!(
            matches!(&res, Err(CredentialValidationError::EmptyField { field, .. }) if field == "username"),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn credentials_serde_tagged() {
        let json = r#"{"provider":"westcn","credentials":{"username":"u","api_password":"p"}}"#;
        let res: serde_json::Result<ProviderCredentials> = serde_json::from_str(json);
        assert!(
            matches!(&res, Ok(ProviderCredentials::Westcn { username, api_password }) if username == "u" && api_password == "p"),
            "unexpected result: {res:?}"
        );
    }

    // ============ DnsRecordType Test ============

    #[test]
    fn dns_record_type_serialize() {
        let json_res = serde_json::to_string(&DnsRecordType::Aaaa);
        assert!(
            json_res.is_ok(),
            "serde_json::to_string failed: {json_res:?}"
        );
        let Ok(json) = json_res else {
            return;
        };
        assert_eq!(json, "\"AAAA\"");
    }

    #[test]
    fn dns_record_type_display() {
        assert_eq!(DnsRecordType::A.to_string(), "A");
        assert_eq!(DnsRecordType::Cname.to_string(), "CNAME");
        assert_eq!(DnsRecordType::Caa.to_string(), "CAA");
    }

    // ============ RecordData::parse Test ============

    #[test]
    fn parse_a_and_aaaa() {
        assert_eq!(
            parse(DnsRecordType::A, "8.8.8.8").ok(),
            Some(RecordData::A {
                address: "8.8.8.8".into()
            })
        );
        assert_eq!(
            parse(DnsRecordType::Aaaa, "2001:db8::1").ok(),
            Some(RecordData::AAAA {
                address: "2001:db8::1".into()
            })
        );
    }

    #[test]
    fn parse_rejects_bad_address() {
        let res = parse(DnsRecordType::A, "1.2.3");
        assert!(
            matches!(&res, Err(ProviderError::InvalidRecord { .. })),
            "unexpected result: {res:?}"
        );
        let res = parse(DnsRecordType::Aaaa, "8.8.8.8");
        assert!(
            matches!(&res, Err(ProviderError::InvalidRecord { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn parse_mx() {
        assert_eq!(
            parse(DnsRecordType::Mx, "10 mail.example.com").ok(),
            Some(RecordData::MX {
                priority: 10,
                exchange: "mail.example.com".into()
            })
        );
    }

    #[test]
    fn parse_mx_requires_priority() {
        let res = parse(DnsRecordType::Mx, "mail.example.com");
        assert!(
            matches!(&res, Err(ProviderError::InvalidRecord { .. })),
            "unexpected result: {res:?}"
        );
        let res = parse(DnsRecordType::Mx, "ten mail.example.com");
        assert!(
            matches!(&res, Err(ProviderError::InvalidRecord { detail, .. }) if detail.contains("MX priority")),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn parse_srv() {
        assert_eq!(
            parse(DnsRecordType::Srv, "10 20 443 sip.example.com").ok(),
            Some(RecordData::SRV {
                priority: 10,
                weight: 20,
                port: 443,
                target: "sip.example.com".into()
            })
        );
        assert!(parse(DnsRecordType::Srv, "10 20 sip.example.com").is_err());
    }

    #[test]
    fn parse_caa_strips_quotes() {
        assert_eq!(
            parse(DnsRecordType::Caa, "0 issue \"letsencrypt.org\"").ok(),
            Some(RecordData::CAA {
                flags: 0,
                tag: "issue".into(),
                value: "letsencrypt.org".into()
            })
        );
    }

    #[test]
    fn parse_txt_verbatim() {
        assert_eq!(
            parse(DnsRecordType::Txt, "v=spf1 include:_spf.example.com ~all").ok(),
            Some(RecordData::TXT {
                text: "v=spf1 include:_spf.example.com ~all".into()
            })
        );
    }

    #[test]
    fn parse_cname_rejects_empty() {
        let res = parse(DnsRecordType::Cname, "  ");
        assert!(
            matches!(&res, Err(ProviderError::InvalidRecord { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn data_string_is_parse_inverse() {
        let samples = [
            (DnsRecordType::A, "1.2.3.4"),
            (DnsRecordType::Mx, "5 mx.example.com"),
            (DnsRecordType::Srv, "1 2 3 t.example.com"),
            (DnsRecordType::Caa, "128 issuewild \"ca.example.net\""),
            (DnsRecordType::Ns, "ns1.example.com"),
        ];
        for (record_type, text) in samples {
            let res = parse(record_type, text);
            assert!(res.is_ok(), "parse failed: {res:?}");
            let Ok(data) = res else {
                return;
            };
            assert_eq!(data.to_data_string(), text);
        }
    }

    // ============ Rr / DnsRecord Test ============

    #[test]
    fn rr_parse_and_render() {
        let rr = Rr {
            name: "sub".into(),
            ttl: Duration::from_secs(600),
            record_type: "a".into(),
            data: "8.8.8.8".into(),
        };
        let res = rr.parse("test");
        assert!(res.is_ok(), "parse failed: {res:?}");
        let Ok(record) = res else {
            return;
        };
        assert_eq!(record.data.record_type(), Some(DnsRecordType::A));
        assert_eq!(record.rr().record_type, "A");
        assert_eq!(record.rr().data, "8.8.8.8");
        assert_eq!(record.rr().ttl, Duration::from_secs(600));
    }

    #[test]
    fn rr_parse_unknown_type_keeps_raw_data() {
        let rr = Rr {
            name: "4".into(),
            ttl: Duration::from_secs(60),
            record_type: "ptr".into(),
            data: "host.example.com.".into(),
        };
        let res = rr.parse("test");
        assert!(res.is_ok(), "parse failed: {res:?}");
        let Ok(record) = res else {
            return;
        };
        assert_eq!(
            record.data,
            RecordData::Other {
                record_type: "PTR".into(),
                data: "host.example.com.".into()
            }
        );
        assert_eq!(record.data.record_type(), None);
        let back = record.rr();
        assert_eq!(back.record_type, "PTR");
        assert_eq!(back.data, "host.example.com.");
    }

    #[test]
    fn rr_parse_rejects_empty_type() {
        let rr = Rr {
            name: "x".into(),
            ttl: Duration::from_secs(60),
            record_type: " ".into(),
            data: "whatever".into(),
        };
        let res = rr.parse("test");
        assert!(
            matches!(&res, Err(ProviderError::UnsupportedRecordType { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn rr_parse_known_type_stays_strict() {
        let rr = Rr {
            name: "www".into(),
            ttl: Duration::from_secs(60),
            record_type: "A".into(),
            data: "not-an-ip".into(),
        };
        let res = rr.parse("test");
        assert!(
            matches!(&res, Err(ProviderError::InvalidRecord { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn dns_record_serializes_ttl_as_seconds() {
        let record = DnsRecord {
            name: "www".into(),
            ttl: Duration::from_secs(300),
            data: RecordData::A {
                address: "1.2.3.4".into(),
            },
        };
        let json_res = serde_json::to_value(&record);
        assert!(json_res.is_ok(), "serialize failed: {json_res:?}");
        let Ok(json) = json_res else {
            return;
        };
        assert_eq!(json["ttl"], 300);
        assert_eq!(json["data"]["type"], "A");
    }
}
