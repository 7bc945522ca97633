//! Token header utilities.
//!
//! The marketplace API reads the session token from a custom header rather
//! than `Authorization: Bearer`.

use reqwest::header::HeaderName;

use crate::error::SdkError;

/// Header used when the configuration does not name one.
pub const DEFAULT_TOKEN_HEADER: &str = "x-auth-token";

/// Validate a configured token header name.
pub fn parse_token_header(name: Option<&str>) -> Result<HeaderName, SdkError> {
    let name = name.map(str::trim).unwrap_or(DEFAULT_TOKEN_HEADER);
    if name.is_empty() {
        return Err(SdkError::Config("token header name must not be empty".into()));
    }

    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| SdkError::Config(format!("invalid token header name {name:?}: {e}")))
}

/// Shorten a token for log output: the first four characters, then an ellipsis.
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    if prefix.len() == token.len() {
        return "****".to_string();
    }
    format!("{prefix}…")
}
