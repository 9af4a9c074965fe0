/// Middleware modules for the API server
///
/// - `security`: response security headers on every route
/// - `session`: resolves the session cookie to the current user on protected routes

pub mod security;
pub mod session;
