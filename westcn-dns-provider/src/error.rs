use serde::{Deserialize, Serialize};

/// Unified error type for all provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// Nothing in this crate retries on its own. The transport retries only when a retry count
/// was configured, and only for [`NetworkError`](Self::NetworkError),
/// [`Timeout`](Self::Timeout) and [`RateLimited`](Self::RateLimited).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original response body, if available.
        raw_message: Option<String>,
    },

    /// The in-flight call was aborted through its cancellation token.
    Cancelled {
        /// Provider that produced the error.
        provider: String,
    },

    /// A request field contains characters the provider's legacy charset cannot represent.
    EncodingError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the offending text.
        detail: String,
    },

    /// The response body is not valid legacy-encoded JSON, or its payload has an unexpected shape.
    DecodingError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the decode failure.
        detail: String,
    },

    /// The provider API answered with a non-success result.
    ApiError {
        /// Provider that produced the error.
        provider: String,
        /// Error code reported by the API.
        error_code: i64,
        /// Error message reported by the API.
        message: String,
    },

    /// Record data was rejected while translating between record shapes.
    InvalidRecord {
        /// Provider that produced the error.
        provider: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The record type is not supported.
    UnsupportedRecordType {
        /// Provider that produced the error.
        provider: String,
        /// The unsupported record type string.
        record_type: String,
    },

    /// No existing record matched the name/type/value lookup.
    RecordNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Relative name that was looked up.
        name: String,
        /// Record type that was looked up.
        record_type: String,
    },

    /// A required credential is missing or empty.
    MissingCredential {
        /// Provider that produced the error.
        provider: String,
        /// Name of the missing credential field.
        field: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Cancelled { .. }
                | Self::EncodingError { .. }
                | Self::ApiError { .. }
                | Self::InvalidRecord { .. }
                | Self::UnsupportedRecordType { .. }
                | Self::RecordNotFound { .. }
                | Self::MissingCredential { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::Cancelled { provider } => {
                write!(f, "[{provider}] Request cancelled")
            }
            Self::EncodingError { provider, detail } => {
                write!(f, "[{provider}] Encoding error: {detail}")
            }
            Self::DecodingError { provider, detail } => {
                write!(f, "[{provider}] Decoding error: {detail}")
            }
            Self::ApiError {
                provider,
                error_code,
                message,
            } => {
                write!(f, "[{provider}] {message} (error code: {error_code})")
            }
            Self::InvalidRecord { provider, detail } => {
                write!(f, "[{provider}] Invalid record: {detail}")
            }
            Self::UnsupportedRecordType {
                provider,
                record_type,
            } => {
                write!(f, "[{provider}] Unsupported record type: {record_type}")
            }
            Self::RecordNotFound {
                provider,
                name,
                record_type,
            } => {
                write!(f, "[{provider}] Record '{name}' ({record_type}) not found")
            }
            Self::MissingCredential { provider, field } => {
                write!(f, "[{provider}] Missing credential: {field}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
