//! # Todo Shared Library
//!
//! Domain types and business logic for the todo service: everything the HTTP
//! layer composes but that does not depend on a web framework.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, tasks)
//! - `store`: Persistence interface with Postgres and in-memory backends
//! - `auth`: Password hashing, tokens, session resolution, account flows
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
