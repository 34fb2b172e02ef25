//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod westcn;

pub use westcn::{WestcnProvider, WestcnProviderBuilder};
