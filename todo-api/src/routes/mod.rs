/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `pages`: Welcome, registration and login pages
/// - `auth`: Registration, login and logout form posts
/// - `tasks`: Task list, add and toggle (session required)
/// - `health`: Health check endpoint

pub mod auth;
pub mod health;
pub mod pages;
pub mod tasks;
