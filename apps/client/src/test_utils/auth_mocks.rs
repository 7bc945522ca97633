//! In-memory mocks for the session and auth ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use propnest_types::{Role, UserRecord};

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{
        auth::{AuthApi, VerifiedLogin},
        expiry::Navigator,
        session::CredentialStore,
    },
    domain::entities::session::BearerToken,
    test_utils::create_test_user,
};

// ============================================================================
// InMemoryCredentialStore
// ============================================================================

/// In-memory implementation of CredentialStore for testing.
///
/// Reads and writes can be switched to fail, and every call is recorded.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
    get_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    set_order: Mutex<Vec<String>>,
    remove_batches: Mutex<Vec<Vec<String>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with initial entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: Mutex::new(map),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Keys passed to successful `set` calls, in call order.
    pub fn set_order(&self) -> Vec<String> {
        self.set_order.lock().unwrap().clone()
    }

    /// One entry per successful `remove` call.
    pub fn remove_batches(&self) -> Vec<Vec<String>> {
        self.remove_batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Storage("read failed".into()));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("write failed".into()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.set_order.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage("write failed".into()));
        }
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(*key);
        }
        self.remove_batches
            .lock()
            .unwrap()
            .push(keys.iter().map(|k| k.to_string()).collect());
        Ok(())
    }
}

// ============================================================================
// MockAuthApi
// ============================================================================

/// Scriptable AuthApi.
///
/// Without a scripted response, `request_otp` succeeds, `verify_otp` returns
/// a fresh user with token `test-token`, and `select_role` echoes the
/// requested role back.
#[derive(Default)]
pub struct MockAuthApi {
    calls: AtomicUsize,
    verify_response: Mutex<Option<AppResult<VerifiedLogin>>>,
    select_role_response: Mutex<Option<AppResult<UserRecord>>>,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next `verify_otp` result.
    pub fn respond_to_verify(&self, response: AppResult<VerifiedLogin>) {
        *self.verify_response.lock().unwrap() = Some(response);
    }

    /// Script the next `select_role` result.
    pub fn respond_to_select_role(&self, response: AppResult<UserRecord>) {
        *self.select_role_response.lock().unwrap() = Some(response);
    }

    /// Number of calls that reached the mock.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn request_otp(&self, _phone_number: &str) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn verify_otp(&self, phone_number: &str, _otp: &str) -> AppResult<VerifiedLogin> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.verify_response.lock().unwrap().take() {
            Some(response) => response,
            None => Ok(VerifiedLogin {
                token: "test-token".into(),
                user: create_test_user(|u| u.phone_number = Some(phone_number.to_string())),
            }),
        }
    }

    async fn select_role(
        &self,
        _token: &BearerToken,
        user_id: &str,
        role: Role,
    ) -> AppResult<UserRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.select_role_response.lock().unwrap().take() {
            Some(response) => response,
            None => Ok(UserRecord::new(user_id, role)),
        }
    }
}

// ============================================================================
// RecordingNavigator
// ============================================================================

/// Navigator that counts redirects to login.
#[derive(Default)]
pub struct RecordingNavigator {
    redirects: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}
