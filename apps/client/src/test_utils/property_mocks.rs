//! Scriptable mock for the property endpoints.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use propnest_types::{LeadRecord, LeadSubmission, PropertyPage, PropertyQuery, PropertySummary};

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::property::PropertyApi,
    domain::entities::session::BearerToken,
};

/// In-memory PropertyApi that records what it was sent.
#[derive(Default)]
pub struct MockPropertyApi {
    calls: AtomicUsize,
    listings: Mutex<Vec<PropertySummary>>,
    next_error: Mutex<Option<AppError>>,
    last_token: Mutex<Option<String>>,
    last_property_id: Mutex<Option<String>>,
    last_lead: Mutex<Option<LeadSubmission>>,
}

impl MockPropertyApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(listings: Vec<PropertySummary>) -> Self {
        Self {
            listings: Mutex::new(listings),
            ..Self::default()
        }
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: AppError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }

    pub fn last_property_id(&self) -> Option<String> {
        self.last_property_id.lock().unwrap().clone()
    }

    pub fn last_lead(&self) -> Option<LeadSubmission> {
        self.last_lead.lock().unwrap().clone()
    }

    fn record(&self, token: Option<&BearerToken>, property_id: Option<&str>) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.lock().unwrap() = token.map(|t| t.expose().to_string());
        if let Some(id) = property_id {
            *self.last_property_id.lock().unwrap() = Some(id.to_string());
        }
        match self.next_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PropertyApi for MockPropertyApi {
    async fn list(
        &self,
        query: &PropertyQuery,
        token: Option<&BearerToken>,
    ) -> AppResult<PropertyPage> {
        self.record(token, None)?;
        let listings = self.listings.lock().unwrap().clone();
        let total_results = listings.len() as u64;
        Ok(PropertyPage {
            properties: listings,
            total_pages: 1,
            current_page: query.page,
            total_results,
        })
    }

    async fn like(&self, token: &BearerToken, property_id: &str) -> AppResult<()> {
        self.record(Some(token), Some(property_id))
    }

    async fn track_view(&self, token: &BearerToken, property_id: &str) -> AppResult<()> {
        self.record(Some(token), Some(property_id))
    }

    async fn submit_lead(
        &self,
        token: &BearerToken,
        property_id: &str,
        lead: &LeadSubmission,
    ) -> AppResult<LeadRecord> {
        self.record(Some(token), Some(property_id))?;
        *self.last_lead.lock().unwrap() = Some(lead.clone());
        Ok(LeadRecord {
            id: "lead-1".to_string(),
            property_id: property_id.to_string(),
            name: lead.name.clone(),
            phone_number: lead.phone_number.clone(),
            message: lead.message.clone(),
            status: Some("new".to_string()),
            created_at: None,
        })
    }
}
