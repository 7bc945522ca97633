//! Marketplace API adapter: implements the auth and property ports on top of
//! [`PropnestClient`] and folds SDK errors into [`AppError`].

use async_trait::async_trait;
use propnest_sdk::{ErrorCode, PropnestClient, SdkError};
use propnest_types::{LeadRecord, LeadSubmission, PropertyPage, PropertyQuery, Role, UserRecord};
use tracing::warn;

use crate::app_error::{AppError, AppResult, AuthRejection};
use crate::application::use_cases::auth::{AuthApi, VerifiedLogin};
use crate::application::use_cases::property::PropertyApi;
use crate::domain::entities::session::BearerToken;

#[derive(Clone)]
pub struct HttpMarketplaceApi {
    client: PropnestClient,
}

impl HttpMarketplaceApi {
    pub fn new(client: PropnestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for HttpMarketplaceApi {
    async fn request_otp(&self, phone_number: &str) -> AppResult<()> {
        self.client
            .request_otp(phone_number)
            .await
            .map_err(|e| map_auth_error(e, AuthRejection::InvalidPhoneNumber))?;
        Ok(())
    }

    async fn verify_otp(&self, phone_number: &str, otp: &str) -> AppResult<VerifiedLogin> {
        let response = self
            .client
            .verify_otp(phone_number, otp)
            .await
            .map_err(|e| map_auth_error(e, AuthRejection::InvalidOtp))?;
        Ok(VerifiedLogin {
            token: BearerToken::new(response.token),
            user: response.user,
        })
    }

    async fn select_role(
        &self,
        token: &BearerToken,
        user_id: &str,
        role: Role,
    ) -> AppResult<UserRecord> {
        self.client
            .select_role(token.expose(), user_id, role)
            .await
            .map_err(map_sdk_error)
    }
}

#[async_trait]
impl PropertyApi for HttpMarketplaceApi {
    async fn list(
        &self,
        query: &PropertyQuery,
        token: Option<&BearerToken>,
    ) -> AppResult<PropertyPage> {
        self.client
            .list_properties(query, token.map(BearerToken::expose))
            .await
            .map_err(map_sdk_error)
    }

    async fn like(&self, token: &BearerToken, property_id: &str) -> AppResult<()> {
        self.client
            .like_property(token.expose(), property_id)
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn track_view(&self, token: &BearerToken, property_id: &str) -> AppResult<()> {
        self.client
            .track_view(token.expose(), property_id)
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn submit_lead(
        &self,
        token: &BearerToken,
        property_id: &str,
        lead: &LeadSubmission,
    ) -> AppResult<LeadRecord> {
        self.client
            .submit_lead(token.expose(), property_id, lead)
            .await
            .map_err(map_sdk_error)
    }
}

/// Like [`map_sdk_error`], for the two login endpoints.
///
/// A client-side rejection without an error code is attributed to the input
/// the endpoint checks: the phone number for request-otp, the OTP for
/// verify-otp. Rate limiting stays a server error.
pub fn map_auth_error(error: SdkError, rejection: AuthRejection) -> AppError {
    match error {
        SdkError::Api {
            status,
            code: None,
            message,
        } if status < 500 && status != 429 => AppError::AuthRejected {
            reason: rejection,
            message,
        },
        other => map_sdk_error(other),
    }
}

/// Server messages are passed through verbatim.
pub fn map_sdk_error(error: SdkError) -> AppError {
    match error {
        SdkError::SessionExpired => AppError::SessionExpired,
        SdkError::Api {
            code: Some(ErrorCode::InvalidPhoneNumber),
            message,
            ..
        } => AppError::AuthRejected {
            reason: AuthRejection::InvalidPhoneNumber,
            message,
        },
        SdkError::Api {
            code: Some(ErrorCode::InvalidOtp),
            message,
            ..
        } => AppError::AuthRejected {
            reason: AuthRejection::InvalidOtp,
            message,
        },
        SdkError::Api { message, .. } => AppError::Server(message),
        SdkError::UnexpectedResponse { status, detail } => {
            warn!(status, detail = %detail, "Unexpected API response");
            AppError::Network(format!("Unexpected response from server ({status})"))
        }
        SdkError::Network(e) => {
            warn!(error = %e, "Request failed");
            AppError::Network(e.to_string())
        }
        SdkError::Config(detail) => AppError::Network(detail),
    }
}
