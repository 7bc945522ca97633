use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    application::use_cases::{
        auth::{AuthApi, AuthUseCases},
        expiry::{ExpiryBus, Navigator},
        property::{PropertyApi, PropertyUseCases},
        session::{CredentialStore, SessionHolder},
    },
    domain::entities::session::Session,
    infra::{config::AppConfig, expiry_listener::ExpiryListener},
};

/// The application root: owns the session, the expiry bus and its listener,
/// and the use cases wired to them.
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub session: Arc<SessionHolder>,
    pub expiry: ExpiryBus,
    pub auth: AuthUseCases,
    pub properties: PropertyUseCases,
    navigator: Arc<dyn Navigator>,
    listener: Option<ExpiryListener>,
}

impl AppContext {
    pub fn assemble(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
        auth_api: Arc<dyn AuthApi>,
        property_api: Arc<dyn PropertyApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = Arc::new(SessionHolder::new(store));
        let expiry = ExpiryBus::with_capacity(config.expiry_channel_capacity);

        let auth = AuthUseCases::new(auth_api, session.clone(), expiry.clone());
        let properties = PropertyUseCases::new(property_api, session.clone(), expiry.clone());

        Self {
            config: Arc::new(config),
            session,
            expiry,
            auth,
            properties,
            navigator,
            listener: None,
        }
    }

    /// Start the expiry listener and restore the stored session.
    ///
    /// Calling it again returns the current session without side effects.
    pub async fn start(&mut self) -> Session {
        if self.listener.is_none() {
            self.listener = Some(ExpiryListener::spawn(
                &self.expiry,
                self.session.clone(),
                self.navigator.clone(),
            ));
        }

        let session = self.session.hydrate().await;
        info!(state = ?session.state(), "Session restored");
        session
    }

    /// Let the listener finish pending expiry events, then stop it.
    pub async fn shutdown(&mut self) {
        match self.listener.take() {
            Some(listener) => listener.stop().await,
            None => warn!("Shutdown called before start"),
        }
    }

    pub fn is_running(&self) -> bool {
        self.listener.is_some()
    }
}
