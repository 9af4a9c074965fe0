/// Authentication endpoints
///
/// Form-driven registration, login and logout. The session lives entirely
/// in the `access_token` cookie; nothing is stored server-side.
///
/// # Endpoints
///
/// - `POST /register` - Create an account, then redirect to `/login`
/// - `POST /login` - Set the session cookie, then redirect to `/todo`
/// - `POST /logout` - Clear the session cookie, then redirect to `/`

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, response::Redirect, Form};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use todo_shared::auth::{
    account::{self, Registration},
    session::ACCESS_TOKEN_COOKIE,
};
use validator::Validate;

/// Registration form
///
/// Fields only need to be non-empty; usernames are arbitrary case-sensitive
/// strings and the email is stored as given.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Desired username
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Email address
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login form
///
/// Extra OAuth2 password-form fields (`grant_type`, `scope`, ...) are
/// accepted and ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    /// Username
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password
    pub password: String,
}

/// Session cookie carrying `token`
///
/// Session-scoped (no `Max-Age`); the token's own `exp` bounds its life.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie that makes the browser drop the session cookie
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), secure);
    cookie.make_removal();
    cookie
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&email=a%40x.com&password=pw1
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Username or email already exists
/// - `422 Unprocessable Entity`: Empty field or malformed email
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> ApiResult<Redirect> {
    form.validate()?;

    account::register(
        state.users.as_ref(),
        &state.hasher,
        Registration {
            username: form.username,
            email: form.email,
            password: form.password,
        },
    )
    .await?;

    Ok(Redirect::to("/login"))
}

/// Log in and start a session
///
/// # Errors
///
/// - `404 Not Found`: No such username
/// - `401 Unauthorized`: Incorrect password
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> ApiResult<(CookieJar, Redirect)> {
    form.validate()?;

    let success = account::login(
        state.users.as_ref(),
        &state.hasher,
        state.tokens(),
        &form.username,
        &form.password,
    )
    .await?;

    let cookie = session_cookie(success.token, state.config.api.production);
    Ok((jar.add(cookie), Redirect::to("/todo")))
}

/// End the session
///
/// Always succeeds, with or without a current session.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    // `jar.remove` only emits a removal for cookies the request carried
    let jar = jar.add(removal_cookie(state.config.api.production));
    (jar, Redirect::to("/"))
}
