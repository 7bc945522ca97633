use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Role;

/// A marketplace user as returned by the auth endpoints.
///
/// Serialized with camelCase keys, which is also the format persisted under
/// the `user_data` credential key. Fields this crate does not model are kept
/// in `extra` so a stored record round-trips without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// User ID (`_id` is accepted on input)
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Defaults to `none` when the server omits it
    #[serde(default)]
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// URL of the profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Create a record with only an ID and role set.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            phone_number: None,
            role,
            name: None,
            profile_image: None,
            trust_score: None,
            extra: Map::new(),
        }
    }

    /// Returns true if the user still has to pick tenant or owner.
    pub fn needs_role_selection(&self) -> bool {
        self.role.is_unassigned()
    }
}
