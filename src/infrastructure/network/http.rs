// HTTP client utilities
use crate::domain::error::LingoError;
use reqwest::Client;
use std::time::Duration;

/// Pooled HTTP client with a bounded per-request timeout. One client is
/// shared by every outbound translation call.
pub fn create_client(timeout_secs: u64) -> Result<Client, LingoError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("lingo/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
