//! Wire types shared by the PropNest SDK and client.
//!
//! This crate provides:
//! - The user record and marketplace roles
//! - Auth request/response bodies
//! - Property listing and lead types
//! - API error codes and error bodies

mod auth;
mod errors;
mod property;
mod role;
mod user;

pub use auth::{
    Ack, RequestOtpRequest, SelectRoleRequest, SelectRoleResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
pub use errors::{ApiErrorBody, ErrorCode};
pub use property::{
    LeadRecord, LeadSubmission, ListingType, PropertyPage, PropertyQuery, PropertySummary,
};
pub use role::Role;
pub use user::UserRecord;
