/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Session token issuance and verification
/// - [`session`]: Resolving a request's token to the current user
/// - [`account`]: Register and login flows
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todo_shared::auth::{
///     account::{login, register, Registration},
///     jwt::{TokenConfig, TokenService},
///     password::CredentialHasher,
///     session::{RequestContext, SessionResolver},
/// };
/// use todo_shared::store::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(MemoryStore::new());
/// let hasher = CredentialHasher::default();
/// let tokens = TokenService::new(TokenConfig::new("your-secret-key-at-least-32-bytes"))?;
///
/// register(store.as_ref(), &hasher, Registration {
///     username: "alice".to_string(),
///     email: "a@x.com".to_string(),
///     password: "pw1".to_string(),
/// }).await?;
///
/// let session = login(store.as_ref(), &hasher, &tokens, "alice", "pw1").await?;
///
/// let resolver = SessionResolver::new(tokens, store);
/// let user = resolver.resolve(&RequestContext::with_token(session.token)).await?;
/// assert_eq!(user.username, "alice");
/// # Ok(())
/// # }
/// ```

pub mod account;
pub mod jwt;
pub mod password;
pub mod session;
