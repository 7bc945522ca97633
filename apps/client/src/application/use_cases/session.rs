use std::sync::Arc;

use async_trait::async_trait;
use propnest_types::UserRecord;
use tokio::sync::{Mutex, OnceCell, watch};
use tracing::{debug, instrument, warn};

use crate::app_error::AppResult;
use crate::domain::entities::session::{BearerToken, Session};

/// Store key holding the raw token string.
pub const TOKEN_KEY: &str = "auth_token";
/// Store key holding the serialized [`UserRecord`].
pub const USER_KEY: &str = "user_data";

/// Durable key-value storage for credentials.
///
/// Errors are reported as `AppError::Storage`. The session holder logs them
/// and carries on; they never reach its callers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;
    /// Remove all `keys` in one batched write. Missing keys are not an error.
    async fn remove(&self, keys: &[&str]) -> AppResult<()>;
}

/// Single source of truth for the current session.
///
/// Memory is updated first, then written through to the store. Transitions
/// are serialized, so the store settles in the order transitions were issued.
/// The token and user keys are two separate writes: a crash between them can
/// leave half a pair on disk, which the next `hydrate` treats as no session.
pub struct SessionHolder {
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<Session>,
    hydrated: OnceCell<()>,
    transitions: Mutex<()>,
}

impl SessionHolder {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(Session::loading());
        Self {
            store,
            state,
            hydrated: OnceCell::new(),
            transitions: Mutex::new(()),
        }
    }

    /// Restore the session from the store.
    ///
    /// Runs once per holder; later calls return the current snapshot.
    #[instrument(skip(self))]
    pub async fn hydrate(&self) -> Session {
        self.hydrated
            .get_or_init(|| async {
                let _guard = self.transitions.lock().await;

                let (token, user) = tokio::join!(self.read(TOKEN_KEY), self.read(USER_KEY));
                let restored = match (token, user) {
                    (Some(token), Some(raw_user)) => {
                        match serde_json::from_str::<UserRecord>(&raw_user) {
                            Ok(user) => Some((BearerToken::from(token), user)),
                            Err(e) => {
                                warn!(error = %e, "Stored user record is malformed; starting logged out");
                                None
                            }
                        }
                    }
                    (None, None) => None,
                    _ => {
                        warn!("Only one of token/user found in store; starting logged out");
                        None
                    }
                };

                debug!(restored = restored.is_some(), "Session hydrated");
                self.state.send_modify(|session| {
                    if let Some((token, user)) = restored {
                        session.token = Some(token);
                        session.user = Some(user);
                    }
                    session.is_loading = false;
                });
            })
            .await;

        self.snapshot()
    }

    /// Replace the user record. Does not touch the token.
    #[instrument(skip_all, fields(present = user.is_some()))]
    pub async fn set_user(&self, user: Option<UserRecord>) {
        let _guard = self.transitions.lock().await;

        let serialized = match &user {
            Some(user) => match serde_json::to_string(user) {
                Ok(json) => Some(json),
                Err(e) => {
                    warn!(error = %e, "Failed to serialize user record");
                    return;
                }
            },
            None => None,
        };

        self.state.send_modify(|session| session.user = user);
        self.persist(USER_KEY, serialized.as_deref()).await;
    }

    /// Replace the token. Does not touch the user record.
    #[instrument(skip_all, fields(present = token.is_some()))]
    pub async fn set_token(&self, token: Option<BearerToken>) {
        let _guard = self.transitions.lock().await;

        let raw = token.as_ref().map(|t| t.expose().to_string());
        self.state.send_modify(|session| session.token = token);
        self.persist(TOKEN_KEY, raw.as_deref()).await;
    }

    /// Clear token and user together, then remove both keys in one batch.
    ///
    /// Safe to call when already logged out.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let _guard = self.transitions.lock().await;

        self.state.send_modify(|session| {
            session.token = None;
            session.user = None;
        });

        if let Err(e) = self.store.remove(&[TOKEN_KEY, USER_KEY]).await {
            warn!(error = %e, "Failed to clear stored credentials");
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Watch the session. Each observed value is a whole `Session`.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.state.borrow().user.clone()
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "Failed to read credential; treating as absent");
                None
            }
        }
    }

    async fn persist(&self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(value) => self.store.set(key, value).await,
            None => self.store.remove(&[key]).await,
        };
        if let Err(e) = result {
            warn!(key, error = %e, "Failed to persist credential");
        }
    }
}
