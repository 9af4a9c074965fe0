/// Static pages
///
/// - `GET /` - Welcome page
/// - `GET /register` - Registration form
/// - `GET /login` - Login form

use crate::views;
use axum::response::Html;

/// Welcome page
pub async fn welcome() -> Html<String> {
    views::welcome_page()
}

/// Registration form
pub async fn register_form() -> Html<String> {
    views::register_page()
}

/// Login form
pub async fn login_form() -> Html<String> {
    views::login_page()
}
