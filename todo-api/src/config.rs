/// Configuration management for the API server
///
/// Configuration comes from environment variables, with a `.env` file loaded
/// first when present.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `API_PRODUCTION`: Enables HSTS and `Secure` cookies (default: false)
/// - `DATABASE_URL`: PostgreSQL connection string; unset selects the in-memory store
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `JWT_SECRET`: Secret key for token signing (required, at least 32 characters)
/// - `JWT_TTL_MINUTES`: Session token lifetime (default: 30)
/// - `PASSWORD_HASH_MEMORY_KIB`: Argon2 memory cost (default: 65536)
/// - `PASSWORD_HASH_ITERATIONS`: Argon2 passes (default: 3)
/// - `PASSWORD_HASH_PARALLELISM`: Argon2 lanes (default: 4)
/// - `RUST_LOG`: Log filter (default: todo_api=debug,todo_shared=debug,tower_http=debug)
/// - `LOG_FORMAT`: `json` for JSON log lines, anything else for plain text
///
/// # Example
///
/// ```no_run
/// use todo_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use todo_shared::auth::{jwt::TokenConfig, password::HashParams};
use todo_shared::db::pool::DatabaseConfig;

/// Minimum accepted length of `JWT_SECRET`
pub const MIN_SECRET_LEN: usize = 32;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Postgres configuration; `None` runs on the in-memory store
    pub database: Option<DatabaseConfig>,

    /// Session token configuration
    pub jwt: JwtConfig,

    /// Cost parameters for new password hashes
    pub password: HashParams,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Production mode: HSTS header and `Secure` session cookie
    pub production: bool,
}

/// Session token configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Token lifetime in minutes
    pub ttl_minutes: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// Does not read `.env`; the binary loads it once at startup, before
    /// tracing is initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `JWT_SECRET` is missing or shorter than 32 characters
    /// - A numeric or boolean variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "API_PORT", 8080u16)?;
        let production = parse_bool_or(&lookup, "API_PRODUCTION", false)?;

        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?,
                ..Default::default()
            }),
            None => None,
        };

        let secret = lookup("JWT_SECRET")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if secret.len() < MIN_SECRET_LEN {
            anyhow::bail!("JWT_SECRET must be at least {} characters long", MIN_SECRET_LEN);
        }

        let ttl_minutes = parse_or(&lookup, "JWT_TTL_MINUTES", 30i64)?;
        if ttl_minutes <= 0 {
            anyhow::bail!("JWT_TTL_MINUTES must be positive");
        }

        let defaults = HashParams::default();
        let password = HashParams {
            memory_kib: parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&lookup, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                production,
            },
            database,
            jwt: JwtConfig {
                secret,
                ttl_minutes,
            },
            password,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Token service configuration derived from `jwt`
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(self.jwt.secret.clone()).with_ttl(Duration::minutes(self.jwt.ttl_minutes))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e)),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off" | "") => Ok(false),
        Some(v) => anyhow::bail!("Invalid boolean for {}: {}", key, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("JWT_SECRET", SECRET)]).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(!config.api.production);
        assert!(config.database.is_none());
        assert_eq!(config.jwt.ttl_minutes, 30);
        assert_eq!(config.password, HashParams::default());
        assert_eq!(config.token_config().ttl, Duration::minutes(30));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("JWT_SECRET", SECRET),
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "3000"),
            ("API_PRODUCTION", "true"),
            ("DATABASE_URL", "postgresql://localhost/todo"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("JWT_TTL_MINUTES", "5"),
            ("PASSWORD_HASH_ITERATIONS", "2"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert!(config.api.production);

        let database = config.database.as_ref().unwrap();
        assert_eq!(database.url, "postgresql://localhost/todo");
        assert_eq!(database.max_connections, 4);

        assert_eq!(config.token_config().ttl, Duration::minutes(5));
        assert_eq!(config.password.iterations, 2);
        assert_eq!(config.password.memory_kib, 65536);
    }

    #[test]
    fn test_empty_database_url_means_memory() {
        let config = load(&[("JWT_SECRET", SECRET), ("DATABASE_URL", "")]).unwrap();
        assert!(config.database.is_none());
    }

    #[test]
    fn test_missing_secret() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_short_secret() {
        let err = load(&[("JWT_SECRET", "too-short")]).unwrap_err();
        assert!(err.to_string().contains("at least 32"));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(load(&[("JWT_SECRET", SECRET), ("API_PORT", "eighty")]).is_err());
        assert!(load(&[("JWT_SECRET", SECRET), ("JWT_TTL_MINUTES", "0")]).is_err());
        assert!(load(&[("JWT_SECRET", SECRET), ("API_PRODUCTION", "maybe")]).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = load(&[("JWT_SECRET", SECRET)]).unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains("<redacted>"));
    }
}
