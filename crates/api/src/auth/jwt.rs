//! Credential claims and their signed wire encoding.
//!
//! Credentials are HS256-signed JWTs carrying a [`Claims`] payload. Access and
//! refresh credentials share the payload shape but are signed with different
//! secrets, so neither kind verifies where the other is expected.
//!
//! [`decode_claims`] pins the algorithm to HS256 instead of trusting the
//! token header, and deliberately does NOT check expiry: callers compare
//! [`Claims::exp`] against their own clock (see `auth::gate`).

use std::collections::HashSet;
use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use marquee_core::identity::Identity;
use marquee_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{env_or, require_env, ConfigError};

/// The `iss` claim stamped into, and required on, every credential.
pub const TOKEN_ISSUER: &str = "marquee-auth";

/// The only signing algorithm accepted.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// The two credential kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// JWT claims embedded in every credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// The user's role name (e.g. `"admin"`, `"user"`).
    pub role: String,
    /// Always [`TOKEN_ISSUER`].
    pub iss: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4); two credentials minted in the same
    /// second for the same user still differ.
    pub jti: String,
}

impl Claims {
    /// Build claims for `identity` valid from `issued_at` until `expires_at`.
    pub fn new(identity: &Identity, issued_at: Timestamp, expires_at: Timestamp) -> Self {
        Self {
            sub: identity.user_id.clone(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            role: identity.role.clone(),
            iss: TOKEN_ISSUER.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// The identity asserted by these claims.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.sub.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role.clone(),
        }
    }

    /// Whether the credential is past its expiry at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Failures from encoding or decoding a credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Not a structurally valid credential of ours (bad segments, bad
    /// base64/JSON, missing claims, foreign issuer).
    #[error("malformed credential")]
    Malformed,

    /// The signature does not match the payload under the given secret.
    #[error("signature verification failed")]
    BadSignature,

    /// The header names an algorithm other than HS256.
    #[error("unsupported signing algorithm")]
    UnsupportedAlgorithm,

    /// Signing failed while encoding.
    #[error("signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for CodecError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => CodecError::BadSignature,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => CodecError::UnsupportedAlgorithm,
            _ => CodecError::Malformed,
        }
    }
}

/// Sign `claims` with `secret` using HS256.
pub fn encode_claims(claims: &Claims, secret: &[u8]) -> Result<String, CodecError> {
    encode(
        &Header::new(SIGNING_ALGORITHM),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| CodecError::Signing(e.to_string()))
}

/// Verify and decode a credential signed with `secret`.
///
/// Rejects any algorithm other than HS256 and any issuer other than
/// [`TOKEN_ISSUER`]. Does not reject expired credentials.
pub fn decode_claims(token: &str, secret: &[u8]) -> Result<Claims, CodecError> {
    let mut validation = Validation::new(SIGNING_ALGORITHM);
    validation.validate_exp = false;
    validation.required_spec_claims =
        HashSet::from(["exp".to_string(), "iss".to_string(), "sub".to_string()]);
    validation.set_issuer(&[TOKEN_ISSUER]);

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(token_data.claims)
}

/// Configuration for credential signing and lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret for access credentials.
    pub access_secret: String,
    /// HMAC secret for refresh credentials. Always differs from `access_secret`.
    pub refresh_secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Build a config, rejecting empty or shared secrets and non-positive lifetimes.
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_token_expiry_mins: i64,
        refresh_token_expiry_days: i64,
    ) -> Result<Self, ConfigError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        if access_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_ACCESS_SECRET"));
        }
        if refresh_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_REFRESH_SECRET"));
        }
        if access_secret == refresh_secret {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_SECRET",
                reason: "must differ from JWT_ACCESS_SECRET".into(),
            });
        }
        if access_token_expiry_mins <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY_MINS",
                reason: "must be positive".into(),
            });
        }
        if refresh_token_expiry_days <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_EXPIRY_DAYS",
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        })
    }

    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_ACCESS_SECRET`        | **yes**  | --      |
    /// | `JWT_REFRESH_SECRET`       | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            require_env("JWT_ACCESS_SECRET")?,
            require_env("JWT_REFRESH_SECRET")?,
            env_or("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS)?,
            env_or("JWT_REFRESH_EXPIRY_DAYS", DEFAULT_REFRESH_EXPIRY_DAYS)?,
        )
    }

    /// The signing secret for a credential kind.
    pub fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.access_secret.as_bytes(),
            TokenKind::Refresh => self.refresh_secret.as_bytes(),
        }
    }

    /// Lifetime of a credential kind.
    pub fn ttl(&self, kind: TokenKind) -> chrono::Duration {
        match kind {
            TokenKind::Access => chrono::Duration::minutes(self.access_token_expiry_mins),
            TokenKind::Refresh => chrono::Duration::days(self.refresh_token_expiry_days),
        }
    }
}
