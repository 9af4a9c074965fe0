/// Per-request session resolution
///
/// Turns the credentials carried by a request into the current [`User`]. The
/// HTTP layer extracts the token into a [`RequestContext`]; everything after
/// that is framework-free.
///
/// # Outcomes
///
/// | Request                              | Result                          |
/// |--------------------------------------|---------------------------------|
/// | no token                             | `SessionError::MissingToken`    |
/// | bad signature / expired / malformed  | `SessionError::InvalidToken`    |
/// | valid token, username no longer known| `SessionError::UnknownSubject`  |
/// | valid token, known username          | `Ok(User)`                      |
///
/// The first three are all "unauthenticated" (HTTP 401). Storage failures are
/// reported separately as `SessionError::Store`.
///
/// Nothing is cached between requests: every call re-verifies the token and
/// re-reads the user.

use std::sync::Arc;

use tracing::{debug, warn};

use super::jwt::{JwtError, TokenService};
use crate::models::user::User;
use crate::store::{StoreError, UserDirectory};

/// Name of the cookie carrying the session token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Credentials extracted from an incoming request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Raw session token, if the request carried one
    pub token: Option<String>,
}

impl RequestContext {
    /// Context for a request without credentials
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context carrying `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Builds a context from the `access_token` cookie value and the
    /// `Authorization` header value
    ///
    /// The cookie wins when both are present. The header is only used in
    /// `Bearer <token>` form. Blank values count as absent.
    pub fn from_credentials(cookie: Option<&str>, authorization: Option<&str>) -> Self {
        let from_cookie = cookie.map(str::trim).filter(|t| !t.is_empty());
        let from_header = authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        Self {
            token: from_cookie.or(from_header).map(str::to_string),
        }
    }

    /// Whether the request carried no token at all
    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }
}

/// Error type for session resolution
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Request carried no token
    #[error("Not authenticated")]
    MissingToken,

    /// Token failed verification
    #[error("Could not validate credentials: {0}")]
    InvalidToken(#[from] JwtError),

    /// Token is valid but names a user that does not exist
    #[error("Could not validate credentials")]
    UnknownSubject,

    /// User lookup failed
    #[error("Session lookup failed: {0}")]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Whether this should be reported to the client as unauthenticated
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, SessionError::Store(_))
    }
}

/// Resolves request credentials to the current user
#[derive(Clone)]
pub struct SessionResolver {
    tokens: TokenService,
    users: Arc<dyn UserDirectory>,
}

impl SessionResolver {
    /// Creates a resolver over a token service and user directory
    pub fn new(tokens: TokenService, users: Arc<dyn UserDirectory>) -> Self {
        Self { tokens, users }
    }

    /// Token service used for verification
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Resolves the current user for a request
    pub async fn resolve(&self, ctx: &RequestContext) -> Result<User, SessionError> {
        let token = ctx.token.as_deref().ok_or(SessionError::MissingToken)?;

        let username = self.tokens.verify(token).map_err(|e| {
            warn!(reason = %e, "Rejected session token");
            SessionError::InvalidToken(e)
        })?;

        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                warn!(username = %username, "Session token names unknown user");
                SessionError::UnknownSubject
            })?;

        debug!(user_id = user.id, "Session resolved");
        Ok(user)
    }
}
