//! # Todo API Server
//!
//! Serves the todo web application: registration, cookie sessions and a
//! per-user task list.
//!
//! Runs on PostgreSQL when `DATABASE_URL` is set, otherwise on a process-local
//! in-memory store.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) cargo run -p todo-api
//! ```

use std::sync::Arc;

use todo_api::{
    app::{build_router, AppState},
    config::Config,
};
use todo_shared::db::{
    migrations::{ensure_database_exists, run_migrations},
    pool::{close_pool, create_pool},
};
use todo_shared::store::{MemoryStore, PgStore};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_api=debug,todo_shared=debug,tower_http=debug".into()),
        )
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before tracing reads RUST_LOG and LOG_FORMAT
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("Todo API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    let (state, pool) = match config.database.clone() {
        Some(database) => {
            ensure_database_exists(&database.url).await?;
            let pool = create_pool(database).await?;
            run_migrations(&pool).await?;

            let state = AppState::new(Arc::new(PgStore::new(pool.clone())), config)?;
            (state, Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store, data will not persist");
            (AppState::new(Arc::new(MemoryStore::new()), config)?, None)
        }
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}
