//! Store failures surfaced through the HTTP layer.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use mockall::mock;
use serde_json::Value;
use tower::ServiceExt;

use jobboard_api::auth::TokenService;
use jobboard_api::{create_router, ApiConfig, AppState, AuthConfig};
use jobboard_store::{
    DocumentStore, Document, InsertOutcome, StoreError, StoreResult, UpdateOutcome,
};

mock! {
    pub Store {}

    #[async_trait]
    impl DocumentStore for Store {
        async fn find(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>>;
        async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>>;
        async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<InsertOutcome>;
        async fn update_one(
            &self,
            collection: &str,
            filter: Document,
            update: Document,
        ) -> StoreResult<UpdateOutcome>;
        async fn ping(&self) -> StoreResult<()>;
    }
}

fn app(store: MockStore) -> Router {
    let state = AppState::with_store(
        ApiConfig::default(),
        &AuthConfig::new("test-secret"),
        Arc::new(store),
    );
    create_router(state, None)
}

fn unreachable() -> StoreError {
    StoreError::config("connection refused")
}

async fn get(app: Router, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_list_jobs_store_error_is_500() {
    let mut store = MockStore::new();
    store.expect_find().returning(|_, _| Err(unreachable()));

    let (status, body) = get(app(store), "/jobs", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_ready_reports_degraded_store() {
    let mut store = MockStore::new();
    store.expect_ping().returning(|| Err(unreachable()));

    let (status, body) = get(app(store), "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store"]["status"], "error");
}

#[tokio::test]
async fn test_forbidden_caller_never_reaches_store() {
    // No expectations: any store call would panic the mock
    let store = MockStore::new();
    let token = TokenService::new(b"test-secret").issue("a@x.com").unwrap();
    let cookie = format!("token={token}");

    let (status, body) = get(app(store), "/job-applications?email=b@x.com", Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Forbidden access");
}

#[tokio::test]
async fn test_unauthenticated_caller_never_reaches_store() {
    let store = MockStore::new();

    let (status, _) = get(app(store), "/job-applications?email=a@x.com", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
