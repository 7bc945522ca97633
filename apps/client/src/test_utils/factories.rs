//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, TimeZone, Utc};
use propnest_types::{ListingType, PropertySummary, Role, UserRecord};
use serde_json::Map;

/// Create a freshly verified user who has not picked a role yet.
pub fn create_test_user(overrides: impl FnOnce(&mut UserRecord)) -> UserRecord {
    let mut user = UserRecord {
        id: "user-1".to_string(),
        phone_number: Some("9876543210".to_string()),
        role: Role::None,
        name: None,
        profile_image: None,
        trust_score: None,
        extra: Map::new(),
    };
    overrides(&mut user);
    user
}

/// Create a rental listing with sensible defaults.
pub fn create_test_property(overrides: impl FnOnce(&mut PropertySummary)) -> PropertySummary {
    let mut property = PropertySummary {
        id: "prop-1".to_string(),
        title: "2BHK near Baner".to_string(),
        price: Some(25_000.0),
        location: Some("Baner".to_string()),
        city: Some("Pune".to_string()),
        property_type: Some("apartment".to_string()),
        listing_type: Some(ListingType::Rent),
        bedrooms: Some(2),
        images: vec![],
        likes: 0,
        views: 0,
        created_at: Some(test_datetime()),
        extra: Map::new(),
    };
    overrides(&mut property);
    property
}

/// Fixed timestamp so assertions are deterministic.
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
        .single()
        .unwrap_or_default()
}
