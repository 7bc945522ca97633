pub mod auth;
pub mod expiry;
pub mod property;
pub mod session;
