//! # Todo API Server Library
//!
//! HTTP layer for the todo service: configuration, the Axum router, the
//! session middleware and server-rendered pages. Domain logic lives in
//! `todo_shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Security headers and session resolution
//! - `routes`: Route handlers
//! - `views`: HTML rendering

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod views;
