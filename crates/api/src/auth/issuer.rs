//! Mints access/refresh credential pairs.

use std::sync::Arc;

use marquee_core::identity::Identity;
use marquee_core::types::Timestamp;

use crate::auth::error::AuthError;
use crate::auth::jwt::{encode_claims, Claims, JwtConfig, TokenKind};

/// A freshly issued credential pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub issued_at: Timestamp,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
}

impl TokenPair {
    /// Access token lifetime in seconds.
    pub fn expires_in(&self) -> i64 {
        (self.access_expires_at - self.issued_at).num_seconds()
    }
}

/// Builds signed credential pairs. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: Arc<JwtConfig>,
}

impl TokenIssuer {
    pub fn new(config: Arc<JwtConfig>) -> Self {
        Self { config }
    }

    /// Issue an access and a refresh credential for `identity`, both issued at `now`.
    ///
    /// Pure given `now` apart from the random `jti`.
    pub fn issue(&self, identity: &Identity, now: Timestamp) -> Result<TokenPair, AuthError> {
        let access_expires_at = now + self.config.ttl(TokenKind::Access);
        let refresh_expires_at = now + self.config.ttl(TokenKind::Refresh);

        let access_token = self.sign(
            &Claims::new(identity, now, access_expires_at),
            TokenKind::Access,
        )?;
        let refresh_token = self.sign(
            &Claims::new(identity, now, refresh_expires_at),
            TokenKind::Refresh,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            issued_at: now,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn sign(&self, claims: &Claims, kind: TokenKind) -> Result<String, AuthError> {
        let secret = self.config.secret(kind);
        if secret.is_empty() {
            return Err(AuthError::Configuration(format!(
                "no {kind} signing secret configured"
            )));
        }
        Ok(encode_claims(claims, secret)?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::auth::jwt::{decode_claims, CodecError};

    fn config() -> Arc<JwtConfig> {
        Arc::new(JwtConfig::new("access-secret", "refresh-secret", 15, 7).unwrap())
    }

    fn identity() -> Identity {
        Identity {
            user_id: "u-1".to_string(),
            email: "a@x.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: "user".to_string(),
        }
    }

    #[test]
    fn issues_pair_with_policy_lifetimes() {
        let config = config();
        let now = Utc::now();
        let pair = TokenIssuer::new(Arc::clone(&config))
            .issue(&identity(), now)
            .expect("issue should succeed");

        let access = decode_claims(&pair.access_token, config.secret(TokenKind::Access)).unwrap();
        let refresh =
            decode_claims(&pair.refresh_token, config.secret(TokenKind::Refresh)).unwrap();

        assert_eq!(access.identity(), identity());
        assert_eq!(refresh.identity(), identity());
        assert_eq!(access.iat, now.timestamp());
        assert_eq!(access.exp - access.iat, 15 * 60);
        assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 60 * 60);
        assert_eq!(pair.expires_in(), 15 * 60);
        assert_eq!(pair.refresh_expires_at - pair.issued_at, Duration::days(7));
    }

    #[test]
    fn kinds_are_not_interchangeable() {
        let config = config();
        let pair = TokenIssuer::new(Arc::clone(&config))
            .issue(&identity(), Utc::now())
            .unwrap();

        assert_eq!(
            decode_claims(&pair.refresh_token, config.secret(TokenKind::Access)),
            Err(CodecError::BadSignature)
        );
        assert_eq!(
            decode_claims(&pair.access_token, config.secret(TokenKind::Refresh)),
            Err(CodecError::BadSignature)
        );
    }

    #[test]
    fn successive_pairs_differ() {
        let issuer = TokenIssuer::new(config());
        let now = Utc::now();
        let a = issuer.issue(&identity(), now).unwrap();
        let b = issuer.issue(&identity(), now).unwrap();
        assert_ne!(a.access_token, b.access_token);
        assert_ne!(a.refresh_token, b.refresh_token);
    }

    #[test]
    fn missing_secret_is_configuration_error() {
        // Bypass `JwtConfig::new` validation to simulate a misconfigured deployment.
        let config = Arc::new(JwtConfig {
            access_secret: String::new(),
            refresh_secret: "refresh-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        });
        let result = TokenIssuer::new(config).issue(&identity(), Utc::now());
        assert_matches!(result, Err(AuthError::Configuration(_)));
    }
}
