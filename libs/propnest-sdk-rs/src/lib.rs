//! Rust SDK for the PropNest marketplace API.
//!
//! # Features
//!
//! - **OTP login** - request and verify one-time passwords sent by SMS
//! - **Role selection** - upgrade a freshly verified user to tenant or owner
//! - **Listings and leads** - search properties, like them, record views, submit enquiries
//! - **Typed errors** - server error codes are decoded into [`ErrorCode`]; the
//!   `TOKEN_EXPIRED` sentinel becomes [`SdkError::SessionExpired`]
//!
//! # Example
//!
//! ```rust,ignore
//! use propnest_sdk::{PropnestClient, PropnestConfig};
//!
//! let client = PropnestClient::new(PropnestConfig {
//!     base_url: "https://api.propnest.in/api".to_string(),
//!     token_header: None,
//! })?;
//!
//! client.request_otp("9876543210").await?;
//! let login = client.verify_otp("9876543210", "1234").await?;
//! println!("Logged in as {}", login.user.id);
//! ```

mod auth;
mod client;
mod error;

pub use auth::{DEFAULT_TOKEN_HEADER, mask_token};
pub use client::{PropnestClient, PropnestConfig};
pub use error::SdkError;

// Re-export shared types for convenience
pub use propnest_types::{
    Ack, ErrorCode, LeadRecord, LeadSubmission, ListingType, PropertyPage, PropertyQuery,
    PropertySummary, Role, UserRecord, VerifyOtpResponse,
};
