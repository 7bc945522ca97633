use thiserror::Error;

use propnest_sdk::SdkError;

/// Errors that can occur while starting the client.
///
/// Display messages never include token values; use Display (%e) in logs.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: {var} is invalid ({reason})")]
    ConfigInvalid { var: &'static str, reason: String },

    #[error("Configuration error: {var} not set and no default is available")]
    ConfigMissing { var: &'static str },

    #[error("HTTP client initialization failed")]
    HttpClient(#[source] reqwest::Error),

    #[error("API client configuration rejected")]
    ApiClient(#[source] SdkError),

    #[error("Cannot open log file")]
    LogFile(#[source] std::io::Error),
}

impl From<SdkError> for InfraError {
    fn from(e: SdkError) -> Self {
        InfraError::ApiClient(e)
    }
}
