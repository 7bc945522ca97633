//! Test utilities for unit testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - An in-memory credential store with failure injection
//! - Scriptable API mocks and a navigator that records redirects

mod auth_mocks;
mod factories;
mod property_mocks;

pub use auth_mocks::*;
pub use factories::*;
pub use property_mocks::*;
