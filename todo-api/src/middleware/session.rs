/// Session authentication middleware
///
/// Guards the task routes. Reads the `access_token` cookie (or an
/// `Authorization: Bearer` header when no cookie is present), resolves it to a
/// user and stores the user in the request extensions as [`CurrentUser`].
/// Handlers extract it with Axum's `Extension` extractor.
///
/// Requests that fail to resolve never reach the handler; they get a 401.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use todo_shared::auth::session::{RequestContext, ACCESS_TOKEN_COOKIE};
use todo_shared::models::user::User;

use crate::{app::AppState, error::ApiError};

/// The authenticated user for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Builds the request context from the cookie jar and request headers
pub fn request_context(jar: &CookieJar, request: &Request) -> RequestContext {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    RequestContext::from_credentials(jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value()), authorization)
}

/// Middleware function for `axum::middleware::from_fn_with_state`
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = request_context(&jar, &request);
    let user = state.sessions.resolve(&ctx).await?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
