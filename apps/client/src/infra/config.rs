use std::path::PathBuf;
use std::time::Duration;

use env_helpers::get_env_default;
use url::Url;

use crate::application::use_cases::expiry::DEFAULT_CAPACITY;
use crate::infra::error::InfraError;
use crate::infra::http_client::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the marketplace REST API, including the `/api` prefix.
    pub api_url: Url,
    pub token_header: String,
    /// JSON file holding the persisted token and user record.
    pub credentials_path: PathBuf,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Optional JSON log sink. Console logs always go to stderr.
    pub log_file: Option<PathBuf>,
    pub expiry_channel_capacity: usize,
}

impl AppConfig {
    /// Config with defaults for everything but the API location and the
    /// credentials file.
    pub fn new(api_url: Url, credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            api_url,
            token_header: propnest_sdk::DEFAULT_TOKEN_HEADER.to_string(),
            credentials_path: credentials_path.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_file: None,
            expiry_channel_capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn from_env() -> Result<Self, InfraError> {
        let raw_api_url: String = get_env_default("PROPNEST_API_URL", DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&raw_api_url)?;

        let token_header: String = get_env_default(
            "PROPNEST_TOKEN_HEADER",
            propnest_sdk::DEFAULT_TOKEN_HEADER.to_string(),
        );

        let credentials_path = match std::env::var("PROPNEST_CREDENTIALS_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_credentials_path().ok_or(InfraError::ConfigMissing {
                var: "PROPNEST_CREDENTIALS_PATH",
            })?,
        };

        let connect_timeout_secs: u64 = get_env_default(
            "PROPNEST_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT.as_secs(),
        );
        let request_timeout_secs: u64 = get_env_default(
            "PROPNEST_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
        );
        if connect_timeout_secs == 0 || request_timeout_secs == 0 {
            return Err(InfraError::ConfigInvalid {
                var: "PROPNEST_*_TIMEOUT_SECS",
                reason: "timeouts must be at least one second".to_string(),
            });
        }

        let log_file = std::env::var("PROPNEST_LOG_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let expiry_channel_capacity: usize =
            get_env_default("PROPNEST_EXPIRY_CHANNEL_CAPACITY", DEFAULT_CAPACITY);

        Ok(Self {
            api_url,
            token_header,
            credentials_path,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            log_file,
            expiry_channel_capacity,
        })
    }
}

/// `~/.config/propnest/credentials.json` or the platform equivalent.
pub fn default_credentials_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("propnest").join("credentials.json"))
}

fn parse_api_url(raw: &str) -> Result<Url, InfraError> {
    let url = Url::parse(raw.trim()).map_err(|e| InfraError::ConfigInvalid {
        var: "PROPNEST_API_URL",
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(InfraError::ConfigInvalid {
            var: "PROPNEST_API_URL",
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}
