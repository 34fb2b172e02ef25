//! # westcn-dns-provider
//!
//! DNS record management for domains hosted at the [west.cn](https://www.west.cn/)
//! (西部数码) registrar.
//!
//! The registrar API differs from most DNS APIs in a few ways this crate hides:
//!
//! - request and response bodies are **GBK** encoded, not UTF-8;
//! - every request is signed with `md5(username + api_password + timestamp)`;
//! - MX priority travels in a separate `level` field;
//! - there is no update call, so "set" is emulated as delete + add.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use westcn_dns_provider::{
//!     create_provider, DnsRecord, ProviderCredentials, RecordData, RecordGetter, RecordSetter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a provider from credentials
//!     let provider = create_provider(ProviderCredentials::Westcn {
//!         username: "your-username".to_string(),
//!         api_password: "your-api-password".to_string(),
//!     })?;
//!
//!     // 2. List records
//!     for record in provider.get_records("example.com.").await? {
//!         let rr = record.rr();
//!         println!("{} {} {}", rr.name, rr.record_type, rr.data);
//!     }
//!
//!     // 3. Replace (or create) a record
//!     let record = DnsRecord {
//!         name: "www".to_string(),
//!         ttl: Duration::from_secs(600),
//!         data: RecordData::A { address: "1.2.3.4".to_string() },
//!     };
//!     provider.set_records("example.com.", &[record]).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Customizing the Provider
//!
//! ```rust,no_run
//! # use westcn_dns_provider::*;
//! # fn example() -> Result<()> {
//! let token = tokio_util::sync::CancellationToken::new();
//! let provider = WestcnProvider::builder("user".to_string(), "secret".to_string())
//!     .max_retries(2)
//!     .cancellation_token(token.clone())
//!     .build()?;
//! assert_eq!(provider.id(), "westcn");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! The error enum provides structured variants for common failure modes:
//!
//! - [`ProviderError::ApiError`] — the registrar rejected the call (`result != 200`)
//! - [`ProviderError::RecordNotFound`] — no existing record matched a delete
//! - [`ProviderError::EncodingError`] — a field cannot be represented in GBK
//! - [`ProviderError::Cancelled`] — the cancellation token fired mid-call
//!
//! Batch operations stop at the first error. Records handled before the error stay
//! changed on the server.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export traits
pub use traits::{
    DnsProvider, HttpTransport, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
};

// Re-export transport types
pub use http_client::{ReqwestTransport, SignedRequest};

// Re-export types
pub use types::{
    CredentialValidationError, DnsRecord, DnsRecordType, ProviderCredentials, RecordData, Rr,
};

// Re-export concrete providers
pub use providers::{WestcnProvider, WestcnProviderBuilder};
