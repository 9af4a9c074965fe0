/// JWT session token issuance and verification
///
/// Session tokens are stateless: a signed claim set naming the user and an
/// absolute expiry. Nothing is stored server-side, so a token stays valid
/// until `exp` even after logout.
///
/// # Security
///
/// - **Algorithm**: HMAC family only (HS256 by default)
/// - **Expiration**: 30 minutes by default, zero leeway on validation
/// - **Validation**: Signature, `exp` and presence of `sub`
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use todo_shared::auth::jwt::{TokenConfig, TokenService};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let tokens = TokenService::new(TokenConfig::new("your-secret-key-at-least-32-bytes"))?;
///
/// let token = tokens.issue("alice")?;
/// assert_eq!(tokens.verify(&token)?, "alice");
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime in minutes
pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature does not match the configured secret
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token could not be decoded or is missing required claims
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Configured algorithm is not an HMAC algorithm
    #[error("Unsupported signing algorithm: {0:?}")]
    UnsupportedAlgorithm(Algorithm),

    /// Secret is empty
    #[error("Signing secret must not be empty")]
    EmptySecret,
}

/// Immutable signing configuration injected into [`TokenService`]
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric signing secret
    pub secret: String,

    /// Signing algorithm (HS256, HS384 or HS512)
    pub algorithm: Algorithm,

    /// Lifetime of issued tokens
    pub ttl: Duration,
}

impl TokenConfig {
    /// HS256 configuration with the default 30 minute lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
        }
    }

    /// Overrides the token lifetime
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Overrides the signing algorithm
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// JWT claims structure
///
/// - `sub`: Subject (username)
/// - `iat`: Issued at (Unix timestamp), zero when absent
/// - `exp`: Expiration (Unix timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - username
    pub sub: String,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring `expires_in` from now
    ///
    /// A negative duration yields already-expired claims.
    pub fn with_expiration(subject: impl Into<String>, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Gets time until expiration
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// Issues and verifies signed session tokens
///
/// Cheap to clone; keys are derived once at construction.
#[derive(Clone)]
pub struct TokenService {
    config: Arc<TokenConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.config.algorithm)
            .field("ttl", &self.config.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a token service from configuration
    ///
    /// # Errors
    ///
    /// - `JwtError::UnsupportedAlgorithm` for non-HMAC algorithms
    /// - `JwtError::EmptySecret` for an empty secret
    pub fn new(config: TokenConfig) -> Result<Self, JwtError> {
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::UnsupportedAlgorithm(config.algorithm));
        }
        if config.secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            config: Arc::new(config),
            encoding_key,
            decoding_key,
        })
    }

    /// Issues a token for `subject` expiring one TTL from now
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_claims(&Claims::with_expiration(subject, self.config.ttl))
    }

    /// Signs an explicit claim set
    pub fn issue_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.config.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
    }

    /// Validates a token and returns its claims
    ///
    /// Verifies:
    /// - Signature matches the configured secret and algorithm
    /// - `exp` and `sub` are present
    /// - `exp` is not in the past (no leeway)
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Validates a token and returns its subject
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        let claims = self.decode(token)?;

        if claims.sub.is_empty() {
            return Err(JwtError::Malformed("empty subject".to_string()));
        }

        Ok(claims.sub)
    }
}
