use serde::{Deserialize, Serialize};

/// Machine-readable error codes sent by the marketplace API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidPhoneNumber,
    InvalidOtp,
    /// The token sent with the request is no longer valid.
    TokenExpired,
    Unauthorized,
    Forbidden,
    NotFound,
    ValidationError,
    RateLimited,
    InternalError,
    /// Any code this client does not know about.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InvalidPhoneNumber => "INVALID_PHONE_NUMBER",
            Self::InvalidOtp => "INVALID_OTP",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::RateLimited => "RATE_LIMITED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// Error body returned by every endpoint on failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message, shown to the user verbatim
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub code: Option<ErrorCode>,
}

impl ApiErrorBody {
    /// The expiry sentinel as it appears on the wire.
    pub const TOKEN_EXPIRED: &'static str = "TOKEN_EXPIRED";

    /// Returns true if this body carries the token-expiry sentinel, either as
    /// `code` or as the whole `message`.
    pub fn is_token_expired(&self) -> bool {
        self.code == Some(ErrorCode::TokenExpired)
            || self
                .message
                .as_deref()
                .is_some_and(|m| m.trim() == Self::TOKEN_EXPIRED)
    }
}
