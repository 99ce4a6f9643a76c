use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::auth::cookies::CookieConfig;
use crate::auth::jwt::JwtConfig;

/// Configuration loading failures. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Read a required, non-empty environment variable.
pub(crate) fn require_env(key: &'static str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

/// Read and parse an optional environment variable, falling back to `default`.
pub(crate) fn env_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Server configuration loaded from environment variables.
///
/// Everything except the JWT secrets has a default suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deadline for each user/session store call in seconds (default: `10`).
    pub store_timeout_secs: u64,
    /// PostgreSQL URL. `None` runs against the in-memory store.
    pub database_url: Option<String>,
    /// JWT token configuration (secrets, expiry durations).
    pub jwt: JwtConfig,
    /// Session cookie attributes.
    pub cookies: CookieConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORE_TIMEOUT_SECS`   | `10`                       |
    /// | `DATABASE_URL`         | unset (in-memory store)    |
    ///
    /// See [`JwtConfig::from_env`] and [`CookieConfig::from_env`] for the rest.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30)?;
        let store_timeout_secs: u64 = env_or("STORE_TIMEOUT_SECS", 10)?;
        if store_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "STORE_TIMEOUT_SECS",
                reason: "must be positive".into(),
            });
        }

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty());

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_timeout_secs,
            database_url,
            jwt: JwtConfig::from_env()?,
            cookies: CookieConfig::from_env()?,
        })
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}
