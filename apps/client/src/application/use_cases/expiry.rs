//! Session-expiry event bus.
//!
//! Any call that comes back with the server's `TOKEN_EXPIRED` sentinel is
//! reported here. The listener registered by the application context turns
//! the event into a forced logout and a redirect to login.

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::session::BearerToken;

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 16;

/// The server rejected `token` as expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpired {
    pub token: BearerToken,
}

/// Sends the user to the login entry point.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Broadcast bus for [`SessionExpired`] events, owned by the application root.
///
/// At-most-once delivery: events published while nobody listens are dropped.
#[derive(Clone)]
pub struct ExpiryBus {
    sender: broadcast::Sender<SessionExpired>,
}

impl ExpiryBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event. Returns the number of listeners that received it.
    pub fn publish(&self, event: SessionExpired) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                warn!("Session expired but no expiry listener is registered");
                0
            }
        }
    }

    /// Report `result` of a call made with `token`, publishing an event when
    /// the server said the token expired. The result is handed back as is.
    pub fn observe<T>(&self, token: &BearerToken, result: AppResult<T>) -> AppResult<T> {
        if let Err(AppError::SessionExpired) = &result {
            debug!("Call rejected with TOKEN_EXPIRED");
            self.publish(SessionExpired {
                token: token.clone(),
            });
        }
        result
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionExpired> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ExpiryBus {
    fn default() -> Self {
        Self::new()
    }
}
