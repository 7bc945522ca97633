//! PropNest API client implementation.

use propnest_types::{
    Ack, ApiErrorBody, LeadRecord, LeadSubmission, PropertyPage, PropertyQuery,
    RequestOtpRequest, Role, SelectRoleRequest, SelectRoleResponse, UserRecord, VerifyOtpRequest,
    VerifyOtpResponse,
};
use reqwest::{RequestBuilder, StatusCode, header::HeaderName};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::parse_token_header;
use crate::error::SdkError;

/// Longest slice of an unparsable body kept in `SdkError::UnexpectedResponse`.
const DETAIL_LIMIT: usize = 200;

/// Configuration for the PropNest client.
#[derive(Debug, Clone)]
pub struct PropnestConfig {
    /// Base URL of the REST API (e.g., "https://api.propnest.in/api")
    pub base_url: String,

    /// Header carrying the session token (default: `x-auth-token`)
    pub token_header: Option<String>,
}

/// Typed client for the marketplace REST API.
///
/// Every call is a single request with no retry. Calls that take a `token`
/// send it in the configured token header.
#[derive(Debug, Clone)]
pub struct PropnestClient {
    base_url: Url,
    token_header: HeaderName,
    http_client: reqwest::Client,
}

impl PropnestClient {
    /// Create a client with a default `reqwest::Client`.
    pub fn new(config: PropnestConfig) -> Result<Self, SdkError> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client that sends requests through `http_client`.
    ///
    /// Use this to share one connection pool and its timeouts.
    pub fn with_http_client(
        config: PropnestConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, SdkError> {
        let raw = config.base_url.trim();
        if raw.is_empty() {
            return Err(SdkError::Config("baseUrl is required".into()));
        }

        let base_url = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| SdkError::Config(format!("invalid baseUrl {raw:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SdkError::Config(format!("baseUrl {raw:?} cannot hold a path")));
        }

        let token_header = parse_token_header(config.token_header.as_deref())?;

        Ok(Self {
            base_url,
            token_header,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token_header(&self) -> &HeaderName {
        &self.token_header
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Phase 1 of the OTP login: ask the server to text a code to `phone_number`.
    pub async fn request_otp(&self, phone_number: &str) -> Result<Ack, SdkError> {
        let request = self
            .http_client
            .post(self.endpoint(&["auth", "request-otp"])?)
            .json(&RequestOtpRequest {
                phone_number: phone_number.to_string(),
            });

        self.send_ack(request).await
    }

    /// Phase 2 of the OTP login: exchange the code for a token and user record.
    pub async fn verify_otp(
        &self,
        phone_number: &str,
        otp: &str,
    ) -> Result<VerifyOtpResponse, SdkError> {
        let request = self
            .http_client
            .post(self.endpoint(&["auth", "verify-otp"])?)
            .json(&VerifyOtpRequest {
                phone_number: phone_number.to_string(),
                otp: otp.to_string(),
            });

        self.send_json(request).await
    }

    /// Assign `role` to a freshly verified user. Returns the updated record.
    pub async fn select_role(
        &self,
        token: &str,
        user_id: &str,
        role: Role,
    ) -> Result<UserRecord, SdkError> {
        let request = self
            .http_client
            .post(self.endpoint(&["auth", "select-role"])?)
            .header(self.token_header.clone(), token)
            .json(&SelectRoleRequest {
                user_id: user_id.to_string(),
                role,
            });

        let response: SelectRoleResponse = self.send_json(request).await?;
        Ok(response.user)
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Search listings. The token is optional; when present the server can
    /// personalise results (liked flags and the like).
    pub async fn list_properties(
        &self,
        query: &PropertyQuery,
        token: Option<&str>,
    ) -> Result<PropertyPage, SdkError> {
        let mut request = self
            .http_client
            .get(self.endpoint(&["property"])?)
            .query(query);
        if let Some(token) = token {
            request = request.header(self.token_header.clone(), token);
        }

        self.send_json(request).await
    }

    pub async fn like_property(&self, token: &str, property_id: &str) -> Result<Ack, SdkError> {
        let request = self
            .http_client
            .post(self.endpoint(&["property", "like", property_id])?)
            .header(self.token_header.clone(), token);

        self.send_ack(request).await
    }

    pub async fn track_view(&self, token: &str, property_id: &str) -> Result<Ack, SdkError> {
        let request = self
            .http_client
            .post(self.endpoint(&["property", "track-view", property_id])?)
            .header(self.token_header.clone(), token);

        self.send_ack(request).await
    }

    // ========================================================================
    // Leads
    // ========================================================================

    pub async fn submit_lead(
        &self,
        token: &str,
        property_id: &str,
        lead: &LeadSubmission,
    ) -> Result<LeadRecord, SdkError> {
        let request = self
            .http_client
            .post(self.endpoint(&["lead", "submit", property_id])?)
            .header(self.token_header.clone(), token)
            .json(lead);

        self.send_json(request).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SdkError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SdkError::Config("baseUrl cannot hold a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String), SdkError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_body(status, &body));
        }

        Ok((status, body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SdkError> {
        let (status, body) = self.send(request).await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(status = %status, error = %e, "Failed to parse API response");
            SdkError::UnexpectedResponse {
                status: status.as_u16(),
                detail: e.to_string(),
            }
        })
    }

    async fn send_ack(&self, request: RequestBuilder) -> Result<Ack, SdkError> {
        let (status, body) = self.send(request).await?;

        // Any 2xx is an acknowledgement; the body only matters when it says no.
        let ack: Ack = match serde_json::from_str(&body) {
            Ok(ack) => ack,
            Err(_) => return Ok(Ack::default()),
        };

        if ack.is_rejected() {
            return Err(SdkError::Api {
                status: status.as_u16(),
                code: None,
                message: ack
                    .message
                    .unwrap_or_else(|| "Request was rejected".to_string()),
            });
        }

        Ok(ack)
    }
}

/// Turn a non-2xx response into a typed error.
fn error_from_body(status: StatusCode, body: &str) -> SdkError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if parsed.is_token_expired() => SdkError::SessionExpired,
        Ok(ApiErrorBody {
            message: Some(message),
            code,
        }) => SdkError::Api {
            status: status.as_u16(),
            code,
            message,
        },
        Ok(ApiErrorBody {
            message: None,
            code: Some(code),
        }) => SdkError::Api {
            status: status.as_u16(),
            code: Some(code),
            message: status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        },
        _ => {
            tracing::warn!(status = %status, "API error without a readable body");
            SdkError::UnexpectedResponse {
                status: status.as_u16(),
                detail: body.chars().take(DETAIL_LIMIT).collect(),
            }
        }
    }
}
