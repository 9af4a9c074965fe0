//! Common test utilities for integration tests
//!
//! Builds the full router over a fresh [`MemoryStore`] with cheap Argon2
//! parameters, and provides helpers for driving it with form posts and
//! cookies the way a browser would.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use todo_api::app::{build_router, AppState};
use todo_api::config::Config;
use todo_shared::models::user::User;
use todo_shared::store::{MemoryStore, UserDirectory};
use tower::Service as _;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    pub app: Router,
}

impl TestContext {
    /// Creates a context over an empty store
    pub fn new() -> anyhow::Result<Self> {
        Self::with_env(&[])
    }

    /// Creates a context with extra configuration variables
    pub fn with_env(vars: &[(&str, &str)]) -> anyhow::Result<Self> {
        let mut env: HashMap<String, String> = [
            ("JWT_SECRET", TEST_SECRET),
            ("PASSWORD_HASH_MEMORY_KIB", "1024"),
            ("PASSWORD_HASH_ITERATIONS", "1"),
            ("PASSWORD_HASH_PARALLELISM", "1"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in vars {
            env.insert(k.to_string(), v.to_string());
        }

        let config = Config::from_lookup(|key| env.get(key).cloned())?;
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), config)?;
        let app = build_router(state.clone());

        Ok(Self { store, state, app })
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().call(request).await.unwrap()
    }

    /// `GET uri`, optionally with a `Cookie` header
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Form `POST`, optionally with a `Cookie` header
    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Response {
        let body = format!(
            "username={}&email={}&password={}",
            username,
            email.replace('@', "%40"),
            password
        );
        self.post_form("/register", &body, None).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        let body = format!("username={}&password={}", username, password);
        self.post_form("/login", &body, None).await
    }

    /// Registers and logs in, returning a `Cookie` header value
    pub async fn signed_in(&self, username: &str, password: &str) -> String {
        let email = format!("{}@example.com", username);
        let response = self.register(username, &email, password).await;
        assert_eq!(response.status(), 303, "registration of {} failed", username);

        let response = self.login(username, password).await;
        session_cookie(&response).expect("login did not set a session cookie")
    }

    /// Looks up a registered user
    pub async fn user(&self, username: &str) -> User {
        self.store
            .find_by_username(username)
            .await
            .unwrap()
            .expect("user should exist")
    }
}

/// The `access_token=...` pair from a response's `Set-Cookie` headers
pub fn session_cookie(response: &Response) -> Option<String> {
    set_cookie_header(response).map(|raw| raw.split(';').next().unwrap_or_default().to_string())
}

/// The full `Set-Cookie` header for the session cookie
pub fn set_cookie_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("access_token="))
        .map(str::to_string)
}

/// Redirect target of a response
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Collects a response body into a string
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Collects a JSON response body
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
