//! Provider factory function.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::WestcnProvider;
use crate::traits::DnsProvider;
use crate::types::ProviderCredentials;

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// The returned provider is wrapped in `Arc<dyn DnsProvider>` for easy sharing
/// across async tasks. Providers created here use the default endpoint and transport;
/// use [`WestcnProvider::builder`] for anything else.
///
/// # Examples
///
/// ```rust,no_run
/// use westcn_dns_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Westcn {
///     username: "your-username".to_string(),
///     api_password: "your-api-password".to_string(),
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn DnsProvider>> {
    match credentials {
        ProviderCredentials::Westcn {
            username,
            api_password,
        } => Ok(Arc::new(WestcnProvider::new(username, api_password)?)),
    }
}
