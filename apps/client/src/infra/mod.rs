pub mod app;
pub mod config;
pub mod error;
pub mod expiry_listener;
pub mod http_client;
pub mod setup;
