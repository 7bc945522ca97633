use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::use_cases::expiry::{ExpiryBus, Navigator, SessionExpired};
use crate::application::use_cases::session::SessionHolder;

/// Background task that turns [`SessionExpired`] events into a forced logout
/// and one redirect to login.
///
/// An event only acts when its token is still the session token, so a burst
/// of failures from one expired token logs out once.
pub struct ExpiryListener {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ExpiryListener {
    /// Subscribe to `bus` and start listening. Events published after this
    /// returns are seen by the listener.
    pub fn spawn(
        bus: &ExpiryBus,
        session: Arc<SessionHolder>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let events = bus.subscribe();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(run_expiry_loop(events, shutdown_rx, session, navigator));

        Self {
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Handle anything already published, then stop.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Expiry listener ended abnormally");
            }
        }
    }
}

impl Drop for ExpiryListener {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run_expiry_loop(
    mut events: broadcast::Receiver<SessionExpired>,
    mut shutdown: oneshot::Receiver<()>,
    session: Arc<SessionHolder>,
    navigator: Arc<dyn Navigator>,
) {
    debug!("Expiry listener started");

    loop {
        tokio::select! {
            biased;
            event = events.recv() => match event {
                Ok(event) => handle_expired(&event, &session, navigator.as_ref()).await,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Expiry listener lagged behind");
                }
                Err(RecvError::Closed) => break,
            },
            _ = &mut shutdown => {
                drain(&mut events, &session, navigator.as_ref()).await;
                break;
            }
        }
    }

    debug!("Expiry listener stopped");
}

async fn drain(
    events: &mut broadcast::Receiver<SessionExpired>,
    session: &SessionHolder,
    navigator: &dyn Navigator,
) {
    loop {
        match events.try_recv() {
            Ok(event) => handle_expired(&event, session, navigator).await,
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Expiry listener lagged behind");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

async fn handle_expired(event: &SessionExpired, session: &SessionHolder, navigator: &dyn Navigator) {
    if session.token().as_ref() != Some(&event.token) {
        debug!(token = ?event.token, "Ignoring expiry for a token no longer in use");
        return;
    }

    info!("Session expired; logging out");
    session.logout().await;
    navigator.redirect_to_login();
}
