use std::sync::Arc;

use async_trait::async_trait;
use propnest_types::{Role, UserRecord};
use tracing::{info, instrument};

use crate::app_error::{AppError, AppResult};
use crate::application::use_cases::expiry::ExpiryBus;
use crate::application::use_cases::session::SessionHolder;
use crate::application::validators::{
    OTP_MIN_LEN, is_valid_otp, is_valid_phone_number, normalize_phone_number,
};
use crate::domain::entities::session::{BearerToken, Session};

/// Result of a successful OTP verification.
#[derive(Debug, Clone)]
pub struct VerifiedLogin {
    pub token: BearerToken,
    pub user: UserRecord,
}

/// The server side of the OTP login and role selection.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn request_otp(&self, phone_number: &str) -> AppResult<()>;
    async fn verify_otp(&self, phone_number: &str, otp: &str) -> AppResult<VerifiedLogin>;
    async fn select_role(
        &self,
        token: &BearerToken,
        user_id: &str,
        role: Role,
    ) -> AppResult<UserRecord>;
}

#[derive(Clone)]
pub struct AuthUseCases {
    api: Arc<dyn AuthApi>,
    session: Arc<SessionHolder>,
    expiry: ExpiryBus,
}

impl AuthUseCases {
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<SessionHolder>, expiry: ExpiryBus) -> Self {
        Self {
            api,
            session,
            expiry,
        }
    }

    /// Phase 1: ask the server to send an OTP. Returns the normalized number
    /// the caller should hold on to for phase 2.
    #[instrument(skip_all)]
    pub async fn request_otp(&self, phone_number: &str) -> AppResult<String> {
        let phone_number = validated_phone(phone_number)?;
        self.api.request_otp(&phone_number).await?;
        info!("OTP requested");
        Ok(phone_number)
    }

    /// Phase 2: exchange the OTP for a session.
    ///
    /// The token is installed before the user record, and both are in place
    /// before this returns.
    #[instrument(skip_all)]
    pub async fn verify_otp(&self, phone_number: &str, otp: &str) -> AppResult<Session> {
        let phone_number = validated_phone(phone_number)?;
        let otp = otp.trim();
        if !is_valid_otp(otp) {
            return Err(AppError::Validation(format!(
                "OTP must be at least {OTP_MIN_LEN} digits"
            )));
        }

        let login = self.api.verify_otp(&phone_number, otp).await?;
        if login.token.expose().is_empty() {
            return Err(AppError::Network(
                "Server returned an empty token".to_string(),
            ));
        }

        self.session.set_token(Some(login.token)).await;
        self.session.set_user(Some(login.user)).await;

        let session = self.session.snapshot();
        info!(role = ?session.role(), "Logged in");
        Ok(session)
    }

    /// Assign tenant or owner to a freshly verified user.
    ///
    /// The server's updated record replaces the session user.
    #[instrument(skip(self, token))]
    pub async fn select_role(
        &self,
        token: &BearerToken,
        user_id: &str,
        role: Role,
    ) -> AppResult<UserRecord> {
        if !role.is_selectable() {
            return Err(AppError::Validation(format!(
                "Role must be tenant or owner, got {role}"
            )));
        }

        let result = self.api.select_role(token, user_id, role).await;
        let user = self.expiry.observe(token, result)?;

        self.session.set_user(Some(user.clone())).await;
        info!(role = %user.role, "Role selected");
        Ok(user)
    }

    /// Role selection for whoever is logged in right now.
    pub async fn select_role_for_current_user(&self, role: Role) -> AppResult<UserRecord> {
        let session = self.session.snapshot();
        match (session.token, session.user) {
            (Some(token), Some(user)) => self.select_role(&token, &user.id, role).await,
            _ => Err(AppError::NotAuthenticated),
        }
    }

    pub async fn logout(&self) {
        self.session.logout().await;
        info!("Logged out");
    }
}

fn validated_phone(raw: &str) -> AppResult<String> {
    let phone_number = normalize_phone_number(raw);
    if !is_valid_phone_number(&phone_number) {
        return Err(AppError::Validation(
            "Enter a 10-digit phone number".to_string(),
        ));
    }
    Ok(phone_number)
}
