//! Crate-level tests
//!
//! Exercise the full authenticate flow against an in-memory store,
//! including the HTTP surface via the router.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use tower::ServiceExt;

use crate::application::token::TokenCodec;
use crate::application::{
    AuthenticateInput, AuthenticateUseCase, IdentifierResolver, IdentityConfig, Resolution,
};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole,
    account_secret::{RawSecret, StoredSecret},
    contact_address::ContactAddress, login_name::LoginName,
};
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::router::identity_router_generic;

// ============================================================================
// In-memory store double
// ============================================================================

#[derive(Clone, Default)]
struct MemoryAccountStore {
    accounts: Arc<Mutex<Vec<Account>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryAccountStore {
    fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
            ..Default::default()
        }
    }

    fn last_authenticated_at(&self, account_id: &AccountId) -> Option<DateTime<Utc>> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.account_id == *account_id)
            .and_then(|a| a.last_authenticated_at)
    }
}

impl AccountStore for MemoryAccountStore {
    async fn find_by_login_name(&self, login_name: &str) -> IdentityResult<Option<Account>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(IdentityError::Internal("store offline".to_string()));
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.login_name.as_str() == login_name)
            .cloned())
    }

    async fn find_by_contact_address(&self, address: &str) -> IdentityResult<Option<Account>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(IdentityError::Internal("store offline".to_string()));
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.contact_address.as_str() == address)
            .cloned())
    }

    async fn update_last_authenticated(
        &self,
        account_id: &AccountId,
        at: DateTime<Utc>,
    ) -> IdentityResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(IdentityError::Internal("store offline".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.account_id == *account_id) {
            account.last_authenticated_at = Some(at);
            account.updated_at = at;
        }
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn make_account(login: &str, address: &str, secret: &str, role: AccountRole) -> Account {
    let raw = RawSecret::new(secret.to_string()).unwrap();
    Account::new(
        LoginName::new(login).unwrap(),
        ContactAddress::new(address).unwrap(),
        StoredSecret::from_raw(&raw, None).unwrap(),
        role,
    )
}

fn alice() -> Account {
    make_account("alice", "alice@example.org", "correct horse battery", AccountRole::Member)
}

fn use_case(store: &MemoryAccountStore) -> AuthenticateUseCase<MemoryAccountStore> {
    use_case_with(store, test_config())
}

fn use_case_with(
    store: &MemoryAccountStore,
    config: IdentityConfig,
) -> AuthenticateUseCase<MemoryAccountStore> {
    AuthenticateUseCase::new(Arc::new(store.clone()), Arc::new(config))
}

fn test_config() -> IdentityConfig {
    IdentityConfig {
        signing_key: [42u8; 32],
        ..Default::default()
    }
}

fn input(identifier: &str, secret: &str) -> AuthenticateInput {
    AuthenticateInput {
        identifier: identifier.to_string(),
        secret: secret.to_string(),
    }
}

async fn response_bytes(err: IdentityError) -> (StatusCode, Vec<u8>) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

// ============================================================================
// Authenticate flow
// ============================================================================

#[tokio::test]
async fn login_name_and_address_reach_the_same_account() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    let use_case = use_case(&store);

    let by_name = use_case
        .execute(input("alice", "correct horse battery"))
        .await
        .unwrap();
    let by_address = use_case
        .execute(input("alice@example.org", "correct horse battery"))
        .await
        .unwrap();

    assert_eq!(by_name.account.account_id, by_address.account.account_id);
}

#[tokio::test]
async fn wrong_secret_is_rejected() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);

    let err = use_case(&store)
        .execute(input("alice", "wrong secret here"))
        .await
        .unwrap_err();

    assert!(matches!(err, IdentityError::InvalidCredentials));
}

#[tokio::test]
async fn unknown_login_name_is_rejected_as_invalid_credentials() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);

    let err = use_case(&store)
        .execute(input("mallory", "correct horse battery"))
        .await
        .unwrap_err();

    assert!(matches!(err, IdentityError::InvalidCredentials));
}

#[tokio::test]
async fn unknown_address_and_wrong_secret_are_indistinguishable() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    let use_case = use_case(&store);

    let unknown = use_case
        .execute(input("nobody@example.org", "correct horse battery"))
        .await
        .unwrap_err();
    let mismatch = use_case
        .execute(input("alice@example.org", "wrong secret here"))
        .await
        .unwrap_err();

    let (status_a, body_a) = response_bytes(unknown).await;
    let (status_b, body_b) = response_bytes(mismatch).await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_a, status_b);
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn disabled_account_with_valid_secret_reports_account_disabled() {
    let mut account = alice();
    account.is_active = false;
    let store = MemoryAccountStore::with_accounts(vec![account]);

    let err = use_case(&store)
        .execute(input("alice", "correct horse battery"))
        .await
        .unwrap_err();

    assert!(matches!(err, IdentityError::AccountDisabled));
}

#[tokio::test]
async fn disabled_account_with_wrong_secret_reports_invalid_credentials() {
    // The secret check runs first, so a disabled account cannot be
    // discovered by probing with wrong secrets.
    let mut account = alice();
    account.is_active = false;
    let store = MemoryAccountStore::with_accounts(vec![account]);

    let err = use_case(&store)
        .execute(input("alice", "wrong secret here"))
        .await
        .unwrap_err();

    assert!(matches!(err, IdentityError::InvalidCredentials));
}

#[tokio::test]
async fn empty_fields_report_missing_fields() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    let use_case = use_case(&store);

    assert!(matches!(
        use_case.execute(input("", "secret")).await.unwrap_err(),
        IdentityError::MissingFields
    ));
    assert!(matches!(
        use_case.execute(input("alice", "")).await.unwrap_err(),
        IdentityError::MissingFields
    ));
}

#[tokio::test]
async fn login_name_lookup_is_case_sensitive() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);

    let err = use_case(&store)
        .execute(input("Alice", "correct horse battery"))
        .await
        .unwrap_err();

    assert!(matches!(err, IdentityError::InvalidCredentials));
}

// ============================================================================
// Sessions and lifetimes
// ============================================================================

#[tokio::test]
async fn issued_tokens_decode_with_expected_lifetimes() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    let config = test_config();
    let codec = TokenCodec::new(&config.signing_key);

    let output = use_case(&store)
        .execute(input("alice", "correct horse battery"))
        .await
        .unwrap();

    let access = codec.decode_access(&output.session.access_token).unwrap();
    let refresh = codec.decode(&output.session.refresh_token).unwrap();

    assert_eq!(access.role, "member");
    assert_eq!(access.exp - access.iat, 600);
    assert_eq!(refresh.typ, "refresh");
    assert_eq!(refresh.exp - refresh.iat, 86_400);
}

#[tokio::test]
async fn administrator_tokens_outlive_member_tokens() {
    let admin = make_account("root", "root@example.org", "admin secret long", AccountRole::Administrator);
    let store = MemoryAccountStore::with_accounts(vec![alice(), admin]);
    let config = test_config();
    let codec = TokenCodec::new(&config.signing_key);
    let use_case = use_case(&store);

    let member = use_case
        .execute(input("alice", "correct horse battery"))
        .await
        .unwrap();
    let admin = use_case
        .execute(input("root", "admin secret long"))
        .await
        .unwrap();

    let member_access = codec.decode(&member.session.access_token).unwrap();
    let admin_access = codec.decode(&admin.session.access_token).unwrap();
    let member_refresh = codec.decode(&member.session.refresh_token).unwrap();
    let admin_refresh = codec.decode(&admin.session.refresh_token).unwrap();

    assert!(admin_access.exp - admin_access.iat > member_access.exp - member_access.iat);
    assert!(admin_refresh.exp - admin_refresh.iat > member_refresh.exp - member_refresh.iat);
    assert_eq!(admin_access.role, "administrator");
}

#[tokio::test]
async fn login_records_last_authenticated_at() {
    let account = alice();
    let account_id = account.account_id;
    let store = MemoryAccountStore::with_accounts(vec![account]);

    assert!(store.last_authenticated_at(&account_id).is_none());

    let output = use_case(&store)
        .execute(input("alice", "correct horse battery"))
        .await
        .unwrap();

    assert!(store.last_authenticated_at(&account_id).is_some());
    // The returned projection reflects the write too
    assert!(output.account.last_authenticated_at.is_some());
}

#[tokio::test]
async fn pepper_must_match_the_one_used_at_hashing() {
    let pepper: &[u8] = b"application-pepper";
    let raw = RawSecret::new("correct horse battery".to_string()).unwrap();
    let account = Account::new(
        LoginName::new("alice").unwrap(),
        ContactAddress::new("alice@example.org").unwrap(),
        StoredSecret::from_raw(&raw, Some(pepper)).unwrap(),
        AccountRole::Member,
    );
    let store = MemoryAccountStore::with_accounts(vec![account]);

    let peppered = IdentityConfig {
        secret_pepper: Some(pepper.to_vec()),
        ..test_config()
    };
    assert!(use_case_with(&store, peppered)
        .execute(input("alice", "correct horse battery"))
        .await
        .is_ok());

    // Same secret without the pepper must not verify
    let err = use_case_with(&store, test_config())
        .execute(input("alice", "correct horse battery"))
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::InvalidCredentials));
}

#[tokio::test]
async fn store_write_failure_does_not_fail_the_login() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    store.fail_writes.store(true, Ordering::SeqCst);

    let output = use_case(&store)
        .execute(input("alice", "correct horse battery"))
        .await
        .unwrap();

    let codec = TokenCodec::new(&test_config().signing_key);
    assert!(codec.decode_access(&output.session.access_token).is_ok());
    assert_eq!(store.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_read_failure_surfaces_as_internal_error() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    store.fail_reads.store(true, Ordering::SeqCst);

    let err = use_case(&store)
        .execute(input("alice", "correct horse battery"))
        .await
        .unwrap_err();

    let (status, body) = response_bytes(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // Internal detail must not leak to the client
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("internal_error"));
    assert!(!body.contains("store offline"));
}

#[tokio::test]
async fn concurrent_logins_issue_distinct_valid_tokens() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    let use_case = use_case(&store);

    let (a, b) = tokio::join!(
        use_case.execute(input("alice", "correct horse battery")),
        use_case.execute(input("alice", "correct horse battery")),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_ne!(a.session.access_token, b.session.access_token);
    assert_ne!(a.session.refresh_token, b.session.refresh_token);

    let codec = TokenCodec::new(&test_config().signing_key);
    assert!(codec.decode_access(&a.session.access_token).is_ok());
    assert!(codec.decode_access(&b.session.access_token).is_ok());
}

// ============================================================================
// Resolver
// ============================================================================

#[tokio::test]
async fn resolving_an_address_is_idempotent_and_skips_the_store() {
    let store = MemoryAccountStore::default();
    store.fail_reads.store(true, Ordering::SeqCst);
    let resolver = IdentifierResolver::new(Arc::new(store));

    // Passes through untouched even though every store read would fail
    let first = resolver.resolve("Alice@Example.org").await.unwrap();
    let Resolution::Resolved(address) = first else {
        panic!("expected passthrough");
    };
    assert_eq!(address, "Alice@Example.org");

    let second = resolver.resolve(&address).await.unwrap();
    assert_eq!(second, Resolution::Resolved(address));
}

#[tokio::test]
async fn resolver_maps_login_name_to_contact_address() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    let resolver = IdentifierResolver::new(Arc::new(store));

    let resolution = resolver.resolve("alice").await.unwrap();
    assert_eq!(
        resolution,
        Resolution::Resolved("alice@example.org".to_string())
    );

    let miss = resolver.resolve("nobody").await.unwrap();
    assert_eq!(miss, Resolution::NotFound);
}

// ============================================================================
// HTTP surface
// ============================================================================

fn test_router(store: MemoryAccountStore) -> axum::Router {
    identity_router_generic(store, test_config())
}

async fn post_json(router: axum::Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn http_login_with_identifier_key() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    let router = test_router(store);

    let (status, json) = post_json(
        router,
        "/login",
        serde_json::json!({"identifier": "alice", "password": "correct horse battery"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["account"]["loginName"], "alice");
    assert_eq!(json["account"]["role"], "member");
    assert!(json["tokens"]["access"].is_string());
    assert!(json["tokens"]["refresh"].is_string());
}

#[tokio::test]
async fn http_login_accepts_legacy_username_and_email_keys() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);

    let (status, _) = post_json(
        test_router(store.clone()),
        "/login",
        serde_json::json!({"username": "alice", "secret": "correct horse battery"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_json(
        test_router(store),
        "/login",
        serde_json::json!({"email": "alice@example.org", "secret": "correct horse battery"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn http_login_missing_fields_is_bad_request() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);

    let (status, json) = post_json(
        test_router(store),
        "/login",
        serde_json::json!({"identifier": "alice"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing_fields");
}

#[tokio::test]
async fn http_profile_requires_bearer_token() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    let router = test_router(store.clone());

    // No token
    let response = test_router(store)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // With a freshly issued token
    let (_, login) = post_json(
        router.clone(),
        "/login",
        serde_json::json!({"identifier": "alice", "password": "correct horse battery"}),
    )
    .await;
    let access = login["tokens"]["access"].as_str().unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/profile")
                .header("authorization", format!("Bearer {access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["role"], "member");
}

#[tokio::test]
async fn administrator_middleware_gates_on_role() {
    use axum::middleware as axum_middleware;
    use axum::routing::get;

    let admin = make_account("root", "root@example.org", "admin secret long", AccountRole::Administrator);
    let store = MemoryAccountStore::with_accounts(vec![alice(), admin]);

    let middleware_state = crate::presentation::middleware::IdentityMiddlewareState {
        config: Arc::new(test_config()),
    };
    let admin_router = axum::Router::new()
        .route("/admin-ping", get(|| async { "pong" }))
        .layer(axum_middleware::from_fn(move |req, next| {
            let state = middleware_state.clone();
            crate::presentation::middleware::require_administrator(state, req, next)
        }));

    let login_router = test_router(store);
    let (_, member_login) = post_json(
        login_router.clone(),
        "/login",
        serde_json::json!({"identifier": "alice", "password": "correct horse battery"}),
    )
    .await;
    let (_, admin_login) = post_json(
        login_router,
        "/login",
        serde_json::json!({"identifier": "root", "password": "admin secret long"}),
    )
    .await;

    let ping = |token: String, router: axum::Router| async move {
        router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/admin-ping")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    };

    let member_token = member_login["tokens"]["access"].as_str().unwrap().to_string();
    let admin_token = admin_login["tokens"]["access"].as_str().unwrap().to_string();

    assert_eq!(ping(member_token, admin_router.clone()).await, StatusCode::FORBIDDEN);
    assert_eq!(ping(admin_token, admin_router).await, StatusCode::OK);
}

#[tokio::test]
async fn http_refresh_token_rejected_on_protected_route() {
    let store = MemoryAccountStore::with_accounts(vec![alice()]);
    let router = test_router(store);

    let (_, login) = post_json(
        router.clone(),
        "/login",
        serde_json::json!({"identifier": "alice", "password": "correct horse battery"}),
    )
    .await;
    let refresh = login["tokens"]["refresh"].as_str().unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/profile")
                .header("authorization", format!("Bearer {refresh}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
