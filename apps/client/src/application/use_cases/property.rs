use std::sync::Arc;

use async_trait::async_trait;
use propnest_types::{LeadRecord, LeadSubmission, PropertyPage, PropertyQuery};
use tracing::instrument;

use crate::app_error::{AppError, AppResult};
use crate::application::use_cases::expiry::ExpiryBus;
use crate::application::use_cases::session::SessionHolder;
use crate::application::validators::{
    is_valid_contact_name, is_valid_phone_number, normalize_phone_number,
};
use crate::domain::entities::session::BearerToken;

/// Listing, like, view-tracking and lead endpoints.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    async fn list(&self, query: &PropertyQuery, token: Option<&BearerToken>)
    -> AppResult<PropertyPage>;
    async fn like(&self, token: &BearerToken, property_id: &str) -> AppResult<()>;
    async fn track_view(&self, token: &BearerToken, property_id: &str) -> AppResult<()>;
    async fn submit_lead(
        &self,
        token: &BearerToken,
        property_id: &str,
        lead: &LeadSubmission,
    ) -> AppResult<LeadRecord>;
}

#[derive(Clone)]
pub struct PropertyUseCases {
    api: Arc<dyn PropertyApi>,
    session: Arc<SessionHolder>,
    expiry: ExpiryBus,
}

impl PropertyUseCases {
    pub fn new(api: Arc<dyn PropertyApi>, session: Arc<SessionHolder>, expiry: ExpiryBus) -> Self {
        Self {
            api,
            session,
            expiry,
        }
    }

    /// Search listings. Sends the token when logged in, but works without one.
    #[instrument(skip(self))]
    pub async fn list_properties(&self, query: &PropertyQuery) -> AppResult<PropertyPage> {
        if query.page < 1 {
            return Err(AppError::Validation("page starts at 1".into()));
        }
        if !(1..=PropertyQuery::MAX_LIMIT).contains(&query.limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                PropertyQuery::MAX_LIMIT
            )));
        }
        if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
            if min > max {
                return Err(AppError::Validation(
                    "minPrice must not exceed maxPrice".into(),
                ));
            }
        }

        match self.session.token() {
            Some(token) => {
                let result = self.api.list(query, Some(&token)).await;
                self.expiry.observe(&token, result)
            }
            None => self.api.list(query, None).await,
        }
    }

    #[instrument(skip(self))]
    pub async fn like_property(&self, property_id: &str) -> AppResult<()> {
        let property_id = validated_id(property_id)?;
        let token = self.require_token()?;
        let result = self.api.like(&token, property_id).await;
        self.expiry.observe(&token, result)
    }

    #[instrument(skip(self))]
    pub async fn track_view(&self, property_id: &str) -> AppResult<()> {
        let property_id = validated_id(property_id)?;
        let token = self.require_token()?;
        let result = self.api.track_view(&token, property_id).await;
        self.expiry.observe(&token, result)
    }

    /// Send an enquiry about a listing.
    #[instrument(skip(self, lead))]
    pub async fn submit_lead(
        &self,
        property_id: &str,
        lead: LeadSubmission,
    ) -> AppResult<LeadRecord> {
        let property_id = validated_id(property_id)?;
        if !is_valid_contact_name(&lead.name) {
            return Err(AppError::Validation("Name is required".into()));
        }
        let phone_number = normalize_phone_number(&lead.phone_number);
        if !is_valid_phone_number(&phone_number) {
            return Err(AppError::Validation(
                "Enter a 10-digit phone number".into(),
            ));
        }
        let lead = LeadSubmission {
            name: lead.name.trim().to_string(),
            phone_number,
            message: lead
                .message
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            preferred_date: lead.preferred_date,
        };

        let token = self.require_token()?;
        let result = self.api.submit_lead(&token, property_id, &lead).await;
        self.expiry.observe(&token, result)
    }

    fn require_token(&self) -> AppResult<BearerToken> {
        self.session.token().ok_or(AppError::NotAuthenticated)
    }
}

fn validated_id(property_id: &str) -> AppResult<&str> {
    let property_id = property_id.trim();
    if property_id.is_empty() {
        return Err(AppError::Validation("property id is required".into()));
    }
    Ok(property_id)
}
