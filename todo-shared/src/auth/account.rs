/// Registration and login flows
///
/// Composes the credential hasher, token service and user directory into the
/// two account operations. Independent of any web framework: inputs are plain
/// values, outputs are domain types or an [`AccountError`].
///
/// Argon2 is deliberately slow, so hashing and verification run on the
/// blocking thread pool.

use tracing::{info, warn};

use super::jwt::{JwtError, TokenService};
use super::password::{CredentialHasher, PasswordError};
use crate::models::user::{CreateUser, User};
use crate::store::{StoreError, UserDirectory};

/// Error type for account flows
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Username or email already registered
    #[error("Username or email already exists")]
    DuplicateUser,

    /// No user with the given username
    #[error("Invalid username or password")]
    NotFound,

    /// Password does not match
    #[error("Incorrect password")]
    BadCredentials,

    /// Hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token signing failed
    #[error(transparent)]
    Token(#[from] JwtError),

    /// Storage failure
    #[error(transparent)]
    Store(StoreError),

    /// Blocking hash task did not complete
    #[error("Password worker failed: {0}")]
    Worker(String),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUser => AccountError::DuplicateUser,
            other => AccountError::Store(other),
        }
    }
}

/// Registration input
#[derive(Debug, Clone)]
pub struct Registration {
    /// Desired username
    pub username: String,

    /// Email address
    pub email: String,

    /// Plaintext password
    pub password: String,
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    /// Authenticated user
    pub user: User,

    /// Signed session token for the user
    pub token: String,
}

/// Registers a new user
///
/// Hashes the password and creates the account. A duplicate username or
/// email fails with [`AccountError::DuplicateUser`] and leaves the directory
/// unchanged.
pub async fn register(
    users: &dyn UserDirectory,
    hasher: &CredentialHasher,
    registration: Registration,
) -> Result<User, AccountError> {
    info!(username = %registration.username, "Registering user");

    let Registration {
        username,
        email,
        password,
    } = registration;

    let hasher = hasher.clone();
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AccountError::Worker(e.to_string()))??;

    let user = users
        .create_user(CreateUser {
            username,
            email,
            password_hash,
        })
        .await
        .map_err(|e| {
            if matches!(e, StoreError::DuplicateUser) {
                warn!("Username or email already exists");
            }
            AccountError::from(e)
        })?;

    info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// Authenticates a user and issues a session token
///
/// - Unknown username: [`AccountError::NotFound`]
/// - Wrong password: [`AccountError::BadCredentials`]
pub async fn login(
    users: &dyn UserDirectory,
    hasher: &CredentialHasher,
    tokens: &TokenService,
    username: &str,
    password: &str,
) -> Result<LoginSuccess, AccountError> {
    let user = users.find_by_username(username).await?.ok_or_else(|| {
        warn!(username = %username, "Login for unknown user");
        AccountError::NotFound
    })?;

    let hasher = hasher.clone();
    let password = password.to_string();
    let stored_hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
        .await
        .map_err(|e| AccountError::Worker(e.to_string()))??;

    if !valid {
        warn!(user_id = user.id, "Login with incorrect password");
        return Err(AccountError::BadCredentials);
    }

    let token = tokens.issue(&user.username)?;

    info!(user_id = user.id, "User logged in");
    Ok(LoginSuccess { user, token })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenConfig;
    use crate::auth::password::HashParams;
    use crate::store::MemoryStore;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
    }

    fn tokens() -> TokenService {
        TokenService::new(TokenConfig::new("account-test-secret-at-least-32-bytes")).unwrap()
    }

    fn registration(username: &str, email: &str, password: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let hasher = hasher();
        let tokens = tokens();

        let user = register(&store, &hasher, registration("alice", "a@x.com", "pw1"))
            .await
            .unwrap();
        assert_ne!(user.password_hash, "pw1");
        assert!(user.password_hash.starts_with("$argon2id$"));

        let success = login(&store, &hasher, &tokens, "alice", "pw1").await.unwrap();
        assert_eq!(success.user.id, user.id);
        assert_eq!(tokens.verify(&success.token).unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let store = MemoryStore::new();
        let hasher = hasher();

        let first = register(&store, &hasher, registration("alice", "a@x.com", "pw1"))
            .await
            .unwrap();
        let result = register(&store, &hasher, registration("alice", "b@x.com", "pw2")).await;

        assert!(matches!(result, Err(AccountError::DuplicateUser)));

        // First account untouched: original password still works
        let success = login(&store, &hasher, &tokens(), "alice", "pw1").await.unwrap();
        assert_eq!(success.user.id, first.id);
        assert_eq!(success.user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let store = MemoryStore::new();

        let result = login(&store, &hasher(), &tokens(), "nobody", "pw").await;
        assert!(matches!(result, Err(AccountError::NotFound)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let store = MemoryStore::new();
        let hasher = hasher();
        register(&store, &hasher, registration("alice", "a@x.com", "pw1"))
            .await
            .unwrap();

        for wrong in ["pw2", "PW1", "", "pw1 "] {
            let result = login(&store, &hasher, &tokens(), "alice", wrong).await;
            assert!(
                matches!(result, Err(AccountError::BadCredentials)),
                "password {:?} should be rejected",
                wrong
            );
        }
    }

    #[tokio::test]
    async fn test_login_username_is_case_sensitive() {
        let store = MemoryStore::new();
        let hasher = hasher();
        register(&store, &hasher, registration("alice", "a@x.com", "pw1"))
            .await
            .unwrap();

        let result = login(&store, &hasher, &tokens(), "ALICE", "pw1").await;
        assert!(matches!(result, Err(AccountError::NotFound)));
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            AccountError::from(StoreError::DuplicateUser),
            AccountError::DuplicateUser
        ));
        assert!(matches!(
            AccountError::from(StoreError::Database(sqlx::Error::RowNotFound)),
            AccountError::Store(_)
        ));
    }
}
