use propnest_types::ErrorCode;
use thiserror::Error;

/// SDK-specific errors.
#[derive(Debug, Error)]
pub enum SdkError {
    /// API returned an error body
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },

    /// The token sent with the request is no longer accepted (`TOKEN_EXPIRED`)
    #[error("Session expired")]
    SessionExpired,

    /// Response could not be understood (wrong shape, not JSON, ...)
    #[error("Unexpected response ({status}): {detail}")]
    UnexpectedResponse { status: u16, detail: String },

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SdkError {
    /// The API error code, if the server sent one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => *code,
            Self::SessionExpired => Some(ErrorCode::TokenExpired),
            _ => None,
        }
    }
}
