use serde::{Deserialize, Serialize};

/// Marketplace role of a user.
///
/// `None` is only valid between OTP verification and role selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    None,
    Tenant,
    Owner,
    Broker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tenant => "tenant",
            Self::Owner => "owner",
            Self::Broker => "broker",
        }
    }

    /// Returns true if the user still has to pick a role.
    pub fn is_unassigned(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns true if a user may pick this role for themselves.
    ///
    /// Brokers are assigned by the marketplace, never self-selected.
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Tenant | Self::Owner)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "tenant" => Ok(Self::Tenant),
            "owner" => Ok(Self::Owner),
            "broker" => Ok(Self::Broker),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
