use propnest_types::{Role, UserRecord};

/// Opaque credential sent with every authorized request.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BearerToken({})", propnest_sdk::mask_token(&self.0))
    }
}

impl From<String> for BearerToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BearerToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The in-memory view of who is logged in.
///
/// Authenticated only while both `token` and `user` are present.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Option<BearerToken>,
    pub user: Option<UserRecord>,
    pub is_loading: bool,
}

/// Coarse session lifecycle state derived from a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Stored credentials have not been read yet
    Loading,
    Empty,
    Authenticated(Role),
}

impl Session {
    /// The state at process start, before hydration.
    pub fn loading() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// True for a verified user who has not picked tenant or owner yet.
    pub fn needs_role_selection(&self) -> bool {
        self.is_authenticated() && self.role().is_some_and(|r| r.is_unassigned())
    }

    pub fn state(&self) -> SessionState {
        if self.is_loading {
            return SessionState::Loading;
        }
        match (&self.token, &self.user) {
            (Some(_), Some(user)) => SessionState::Authenticated(user.role),
            _ => SessionState::Empty,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}
