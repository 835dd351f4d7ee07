//! Router fixtures for auth-api integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth_api::{build_router, AppState, Config};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use latchkey_auth_core::{Argon2Hasher, AuthStore, HashParams, OsTokenSource};
use latchkey_db::{DbError, DbResult, MemorySnapshotRepository, SnapshotRepository};
use latchkey_types::{Identity, InviteCode, StoreSnapshot};
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN: &str = "root@example.com";
pub const ADMIN_PASSWORD: &str = "rootpass1";

/// Router plus handles on its state
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub invite_code: InviteCode,
}

impl TestApp {
    /// Bootstrapped app persisting into `repo`
    pub fn with_repo(repo: Arc<dyn SnapshotRepository>) -> Self {
        Self::with_config(repo, Config::new("unused.json"))
    }

    /// Bootstrapped app with explicit service configuration
    pub fn with_config(repo: Arc<dyn SnapshotRepository>, config: Config) -> Self {
        let hasher = Argon2Hasher::new(HashParams::insecure_fast()).unwrap();
        let store = AuthStore::new(hasher, OsTokenSource::default());
        let invite_code = store.bootstrap(Identity::from(ADMIN));

        let state = AppState::new(store, repo, config);
        let router = build_router(state.clone(), None);
        Self {
            router,
            state,
            invite_code,
        }
    }

    /// Send a JSON POST and return status plus decoded body
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Send a raw request and return status plus decoded body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    /// Sign the administrator up with the bootstrap code; returns its token
    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .post(
                "/cmd/user/sign-up",
                serde_json::json!({
                    "identity": ADMIN,
                    "password": ADMIN_PASSWORD,
                    "inviteCode": self.invite_code.as_str(),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin sign-up failed: {body}");
        body.as_str().unwrap().to_string()
    }
}

/// Bootstrapped app with an in-memory repository
pub fn test_app() -> (TestApp, MemorySnapshotRepository) {
    let repo = MemorySnapshotRepository::new();
    (TestApp::with_repo(Arc::new(repo.clone())), repo)
}

/// Repository whose writes always fail
#[derive(Debug, Default)]
pub struct FailingRepository;

#[async_trait]
impl SnapshotRepository for FailingRepository {
    async fn load(&self) -> DbResult<Option<StoreSnapshot>> {
        Ok(None)
    }

    async fn save(&self, _snapshot: &StoreSnapshot) -> DbResult<()> {
        Err(DbError::Io(std::io::Error::other("disk full")))
    }

    async fn create(&self, _snapshot: &StoreSnapshot) -> DbResult<()> {
        Err(DbError::Io(std::io::Error::other("disk full")))
    }
}

/// In-memory repository that takes `delay` to complete each write
#[derive(Debug, Clone)]
pub struct SlowRepository {
    pub inner: MemorySnapshotRepository,
    pub delay: Duration,
}

impl SlowRepository {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemorySnapshotRepository::new(),
            delay,
        }
    }
}

#[async_trait]
impl SnapshotRepository for SlowRepository {
    async fn load(&self) -> DbResult<Option<StoreSnapshot>> {
        self.inner.load().await
    }

    async fn save(&self, snapshot: &StoreSnapshot) -> DbResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.save(snapshot).await
    }

    async fn create(&self, snapshot: &StoreSnapshot) -> DbResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.create(snapshot).await
    }
}
