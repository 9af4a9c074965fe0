/// Embedded schema migrations
///
/// The SQL files in `todo-shared/migrations/` are compiled in, so the binary
/// carries its own schema. Applied versions are recorded in
/// `_sqlx_migrations`; reapplying is a no-op.

use sqlx::migrate::{MigrateDatabase, MigrateError, Migrator};
use sqlx::postgres::{PgPool, Postgres};
use tracing::{error, info};

/// Every migration shipped with this crate, in version order
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Brings the schema up to date
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let latest = MIGRATOR.iter().map(|m| m.version).max().unwrap_or_default();
    info!(latest, "Applying migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        error!(error = %e, "Migration failed");
        e
    })
}

/// Creates the database named in `database_url` when it is missing
///
/// Convenience for local setups; a provisioned database is left untouched.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        return Ok(());
    }

    info!("Database missing, creating it");
    Postgres::create_database(database_url).await
}
