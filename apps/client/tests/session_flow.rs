//! End-to-end session lifecycle against a mocked marketplace API, with
//! credentials persisted to a temporary file.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use tempfile::tempdir;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use propnest_client::adapters::{api::HttpMarketplaceApi, storage::FileCredentialStore};
use propnest_client::app_error::{AppError, AuthRejection};
use propnest_client::application::use_cases::expiry::Navigator;
use propnest_client::domain::entities::session::{BearerToken, SessionState};
use propnest_client::infra::{app::AppContext, config::AppConfig};
use propnest_sdk::{PropnestClient, PropnestConfig};
use propnest_types::Role;

#[derive(Default)]
struct CountingNavigator(AtomicUsize);

impl Navigator for CountingNavigator {
    fn redirect_to_login(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn app_for(server: &MockServer, credentials: &Path, navigator: Arc<CountingNavigator>) -> AppContext {
    let api_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let config = AppConfig::new(api_url.clone(), credentials);
    let client = PropnestClient::new(PropnestConfig {
        base_url: api_url.to_string(),
        token_header: None,
    })
    .unwrap();
    let api = Arc::new(HttpMarketplaceApi::new(client));
    let store = Arc::new(FileCredentialStore::new(credentials));

    AppContext::assemble(config, store, api.clone(), api, navigator)
}

#[tokio::test]
async fn test_login_role_selection_and_expiry() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let credentials = dir.path().join("credentials.json");

    Mock::given(method("POST"))
        .and(path("/api/auth/request-otp"))
        .and(body_json(json!({"phoneNumber": "9876543210"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify-otp"))
        .and(body_json(json!({"phoneNumber": "9876543210", "otp": "1234"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "user": {"id": "u1", "role": "none"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/select-role"))
        .and(header("x-auth-token", "abc"))
        .and(body_json(json!({"userId": "u1", "role": "tenant"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "u1", "role": "tenant"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/property/like/p1"))
        .and(header("x-auth-token", "abc"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "TOKEN_EXPIRED"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // First run: log in from scratch
    let navigator = Arc::new(CountingNavigator::default());
    let mut app = app_for(&server, &credentials, navigator.clone());
    assert_eq!(app.start().await.state(), SessionState::Empty);

    let phone = app.auth.request_otp("98765 43210").await.unwrap();
    let session = app.auth.verify_otp(&phone, "1234").await.unwrap();
    assert_eq!(session.token, Some(BearerToken::from("abc")));
    assert!(session.needs_role_selection());

    let user = app
        .auth
        .select_role_for_current_user(Role::Tenant)
        .await
        .unwrap();
    assert_eq!(user.role, Role::Tenant);
    app.shutdown().await;

    // Second run: the session comes back from disk
    let mut app = app_for(&server, &credentials, navigator.clone());
    let restored = app.start().await;
    assert_eq!(restored.state(), SessionState::Authenticated(Role::Tenant));
    assert_eq!(restored.user.unwrap().id, "u1");

    // The server expires the token. Shutdown drains the listener, so the
    // forced logout and its redirect have happened once it returns.
    let err = app.properties.like_property("p1").await.unwrap_err();
    assert!(matches!(err, AppError::SessionExpired));
    app.shutdown().await;

    assert_eq!(app.session.snapshot().state(), SessionState::Empty);
    assert_eq!(navigator.0.load(Ordering::SeqCst), 1);

    // Third run: nothing left on disk, so the like never reaches the server
    let mut app = app_for(&server, &credentials, navigator.clone());
    assert_eq!(app.start().await.state(), SessionState::Empty);
    let err = app.properties.like_property("p1").await.unwrap_err();
    assert!(matches!(err, AppError::NotAuthenticated));
    app.shutdown().await;

    assert_eq!(navigator.0.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rejected_otp_leaves_no_credentials() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let credentials = dir.path().join("credentials.json");

    Mock::given(method("POST"))
        .and(path("/api/auth/verify-otp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid OTP"})))
        .mount(&server)
        .await;

    let navigator = Arc::new(CountingNavigator::default());
    let mut app = app_for(&server, &credentials, navigator.clone());
    app.start().await;

    let err = app.auth.verify_otp("9876543210", "0000").await.unwrap_err();
    app.shutdown().await;

    assert!(matches!(
        err,
        AppError::AuthRejected {
            reason: AuthRejection::InvalidOtp,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Invalid OTP");
    assert_eq!(app.session.snapshot().state(), SessionState::Empty);
    assert!(!credentials.exists());
    assert_eq!(navigator.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_anonymous_listing_sends_no_token() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let credentials = dir.path().join("credentials.json");

    Mock::given(method("GET"))
        .and(path("/api/property"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "properties": [{"_id": "p1", "title": "1RK in Kothrud"}],
            "totalPages": 1,
            "currentPage": 1,
            "totalResults": 1
        })))
        .mount(&server)
        .await;

    let mut app = app_for(&server, &credentials, Arc::new(CountingNavigator::default()));
    app.start().await;

    let page = app
        .properties
        .list_properties(&Default::default())
        .await
        .unwrap();
    app.shutdown().await;

    assert_eq!(page.properties[0].id, "p1");
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-auth-token").is_none());
}
