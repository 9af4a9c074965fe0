/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todo_api::{app::{build_router, AppState}, config::Config};
/// use todo_shared::store::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config)?;
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{security::SecurityHeadersLayer, session::require_session},
    routes,
};
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use todo_shared::auth::{
    jwt::{JwtError, TokenService},
    password::CredentialHasher,
    session::SessionResolver,
};
use todo_shared::store::{Store, TaskStore, UserDirectory};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request via Axum's `State` extractor. Every field is
/// either an `Arc` or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Backing store, for health checks
    pub store: Arc<dyn Store>,

    /// User directory view of `store`
    pub users: Arc<dyn UserDirectory>,

    /// Task store view of `store`
    pub tasks: Arc<dyn TaskStore>,

    /// Session resolution for protected routes
    pub sessions: SessionResolver,

    /// Password hashing
    pub hasher: CredentialHasher,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state over a store
    ///
    /// Fails only if the configured token secret is unusable.
    pub fn new<S>(store: Arc<S>, config: Config) -> Result<Self, JwtError>
    where
        S: Store + 'static,
    {
        let tokens = TokenService::new(config.token_config())?;
        let users: Arc<dyn UserDirectory> = store.clone();

        Ok(Self {
            sessions: SessionResolver::new(tokens, users.clone()),
            hasher: CredentialHasher::new(config.password),
            tasks: store.clone(),
            users,
            store,
            config: Arc::new(config),
        })
    }

    /// Token service used to issue session tokens
    pub fn tokens(&self) -> &TokenService {
        self.sessions.tokens()
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                    # Welcome page
/// ├── GET  /register            # Registration form
/// ├── POST /register            # Create account, redirect to /login
/// ├── GET  /login               # Login form
/// ├── POST /login               # Set session cookie, redirect to /todo
/// ├── POST /logout              # Clear session cookie, redirect to /
/// ├── GET  /health              # Health check
/// └── (session required)
///     ├── GET  /todo            # Task list
///     ├── POST /add_task        # Create task, redirect to /todo
///     └── POST /toggle_task/:id # Flip is_active, redirect to /todo
/// ```
///
/// # Middleware Stack
///
/// 1. Session resolution (protected routes only, as a route layer so
///    unknown paths still 404)
/// 2. Logging (tower-http TraceLayer)
/// 3. Security headers (every response)
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(routes::pages::welcome))
        .route(
            "/register",
            get(routes::pages::register_form).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::pages::login_form).post(routes::auth::login),
        )
        .route("/logout", post(routes::auth::logout))
        .route("/health", get(routes::health::health_check));

    let task_routes = Router::new()
        .route("/todo", get(routes::tasks::show_tasks))
        .route("/add_task", post(routes::tasks::add_task))
        .route("/toggle_task/:task_id", post(routes::tasks::toggle_task))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    let production = state.config.api.production;

    Router::new()
        .merge(public_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}
