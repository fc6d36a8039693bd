#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::DateTime;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use warden::modules::users::model::CreateUserDto;
use warden::router::init_router;
use warden::state::AppState;
use warden_config::{CorsConfig, JwtConfig};
use warden_core::{ManualClock, PasswordHasher};
use warden_db::{MemoryUserStore, UserStore};
use warden_models::{Role, User, UserChanges, UpdatePredicate};

pub const PASSWORD: &str = "correct-horse-battery";
pub const START: i64 = 1_700_000_000;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        algorithm: "HS256".to_string(),
        access_token_expire_minutes: 30,
        refresh_token_expire_minutes: 60 * 24 * 7,
    }
}

/// Application state over an in-memory store and a pinned clock.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryUserStore>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryUserStore::new());
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(START, 0).unwrap(),
        ));
        let state = AppState::new(
            store.clone(),
            &test_jwt_config(),
            PasswordHasher::new(4),
            clock.clone(),
            CorsConfig {
                allowed_origins: vec!["*".to_string()],
            },
        );

        Self {
            state,
            store,
            clock,
        }
    }

    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }

    /// Registers a user through the service, then sets its role directly in the store.
    pub async fn user(&self, username: &str, role: Role) -> User {
        let user = self
            .state
            .user_service
            .create(CreateUserDto {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap();

        if role != Role::User {
            self.store
                .conditional_update(user.user_id, UpdatePredicate::active(), UserChanges::role(role))
                .await
                .unwrap();
        }

        self.store.find_by_id(user.user_id).await.unwrap().unwrap()
    }

    pub fn access_token(&self, user: &User) -> String {
        self.state.auth_service.issue_pair(user).unwrap().access_token
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, body)
}
