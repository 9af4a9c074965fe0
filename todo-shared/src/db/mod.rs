/// Postgres plumbing
///
/// - `pool`: connection pool creation, health check, shutdown
/// - `migrations`: embedded schema migrations (`todo-shared/migrations/`)
///
/// Models live in [`crate::models`]; the backend-neutral interface is
/// [`crate::store`].

pub mod migrations;
pub mod pool;
