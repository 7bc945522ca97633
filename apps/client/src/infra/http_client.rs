//! HTTP client factory with consistent timeout configuration.
//!
//! The marketplace API client is built on the `reqwest::Client` returned here
//! rather than constructing one directly.

use reqwest::Client;
use std::time::Duration;

use crate::infra::{config::AppConfig, error::InfraError};

/// Default connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default request timeout (total request/response time).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build an HTTP client with the configured timeouts.
pub fn build_client(config: &AppConfig) -> Result<Client, InfraError> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(concat!("propnest-client/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(InfraError::HttpClient)
}
