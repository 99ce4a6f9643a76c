//! Request-time credential verification.
//!
//! The gate holds only immutable configuration: no locks, no store access.
//! Any number of requests can authenticate concurrently. It never consults
//! the session store, so an access credential stays valid until its own
//! expiry even after logout or rotation.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use marquee_core::identity::Identity;
use marquee_core::types::Timestamp;

use crate::auth::cookies::ACCESS_COOKIE;
use crate::auth::error::AuthError;
use crate::auth::jwt::{decode_claims, Claims, JwtConfig, TokenKind};

/// Verifies credentials against the configured secrets. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AuthGate {
    config: Arc<JwtConfig>,
}

impl AuthGate {
    pub fn new(config: Arc<JwtConfig>) -> Self {
        Self { config }
    }

    /// Authenticate a request from its headers.
    ///
    /// The credential is taken from `Authorization: Bearer <token>` or, failing
    /// that, the `access_token` cookie.
    ///
    /// - Missing, forged, malformed or refresh-kind credential: [`AuthError::Unauthenticated`].
    /// - Authentic but expired: [`AuthError::Expired`].
    pub fn authenticate(&self, headers: &HeaderMap, now: Timestamp) -> Result<Identity, AuthError> {
        let token = extract_access_token(headers)
            .ok_or_else(|| AuthError::Unauthenticated("no access credential presented".into()))?;
        let claims = self.verify(&token, TokenKind::Access, now)?;
        Ok(claims.identity())
    }

    /// Verify a refresh credential for the lifecycle.
    pub fn verify_refresh(&self, token: &str, now: Timestamp) -> Result<Claims, AuthError> {
        self.verify(token, TokenKind::Refresh, now)
    }

    /// Verify a credential of the given kind: signature, algorithm, issuer, then expiry.
    pub fn verify(&self, token: &str, kind: TokenKind, now: Timestamp) -> Result<Claims, AuthError> {
        let claims = decode_claims(token, self.config.secret(kind)).map_err(|e| {
            tracing::debug!(error = %e, %kind, "Credential rejected");
            AuthError::Unauthenticated(format!("{kind} credential rejected: {e}"))
        })?;

        if claims.is_expired_at(now) {
            tracing::debug!(user_id = %claims.sub, %kind, "Credential expired");
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }
}

/// Pull the access credential out of the request headers.
///
/// A well-formed, non-empty bearer header wins over the cookie. The scheme
/// name is matched case-insensitively.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let (scheme, token) = v.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}
