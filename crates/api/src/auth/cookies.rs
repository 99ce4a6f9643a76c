//! Session cookies carrying the access/refresh credential pair.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::auth::issuer::TokenPair;
use crate::config::{env_or, ConfigError};

/// Cookie holding the access credential.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie holding the refresh credential.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Cookie lifetimes and transport flags.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// `Max-Age` of the access cookie in seconds (default: 86400).
    pub access_max_age_secs: i64,
    /// `Max-Age` of the refresh cookie in seconds (default: 604800).
    pub refresh_max_age_secs: i64,
    /// Set the `Secure` flag (default: `true`). Only disable for plain-HTTP
    /// local development.
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_max_age_secs: 86_400,
            refresh_max_age_secs: 604_800,
            secure: true,
        }
    }
}

impl CookieConfig {
    /// | Env Var                       | Default  |
    /// |-------------------------------|----------|
    /// | `ACCESS_COOKIE_MAX_AGE_SECS`  | `86400`  |
    /// | `REFRESH_COOKIE_MAX_AGE_SECS` | `604800` |
    /// | `COOKIE_SECURE`               | `true`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            access_max_age_secs: env_or("ACCESS_COOKIE_MAX_AGE_SECS", defaults.access_max_age_secs)?,
            refresh_max_age_secs: env_or(
                "REFRESH_COOKIE_MAX_AGE_SECS",
                defaults.refresh_max_age_secs,
            )?,
            secure: env_or("COOKIE_SECURE", defaults.secure)?,
        })
    }

    // Browsers drop SameSite=None cookies that are not Secure.
    fn same_site(&self) -> SameSite {
        if self.secure {
            SameSite::None
        } else {
            SameSite::Lax
        }
    }

    fn build(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site())
            .max_age(max_age)
            .build()
    }
}

/// Add both credential cookies for a freshly issued pair.
pub fn set_session_cookies(jar: CookieJar, tokens: &TokenPair, config: &CookieConfig) -> CookieJar {
    jar.add(config.build(
        ACCESS_COOKIE,
        tokens.access_token.clone(),
        Duration::seconds(config.access_max_age_secs),
    ))
    .add(config.build(
        REFRESH_COOKIE,
        tokens.refresh_token.clone(),
        Duration::seconds(config.refresh_max_age_secs),
    ))
}

/// Overwrite both credential cookies with empty, immediately expiring values.
pub fn clear_session_cookies(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    jar.add(config.build(ACCESS_COOKIE, String::new(), Duration::ZERO))
        .add(config.build(REFRESH_COOKIE, String::new(), Duration::ZERO))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn pair() -> TokenPair {
        let now = Utc::now();
        TokenPair {
            access_token: "access.jwt.value".to_string(),
            refresh_token: "refresh.jwt.value".to_string(),
            issued_at: now,
            access_expires_at: now,
            refresh_expires_at: now,
        }
    }

    #[test]
    fn session_cookies_carry_tokens_and_flags() {
        let config = CookieConfig::default();
        let jar = set_session_cookies(CookieJar::new(), &pair(), &config);

        let access = jar.get(ACCESS_COOKIE).expect("access cookie set");
        assert_eq!(access.value(), "access.jwt.value");
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
        assert_eq!(access.same_site(), Some(SameSite::None));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.max_age(), Some(Duration::seconds(86_400)));

        let refresh = jar.get(REFRESH_COOKIE).expect("refresh cookie set");
        assert_eq!(refresh.value(), "refresh.jwt.value");
        assert_eq!(refresh.max_age(), Some(Duration::seconds(604_800)));
    }

    #[test]
    fn cleared_cookies_expire_immediately() {
        let config = CookieConfig::default();
        let jar = clear_session_cookies(CookieJar::new(), &config);

        for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
            let cookie = jar.get(name).expect("cookie present");
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        }
    }

    #[test]
    fn insecure_cookies_fall_back_to_lax() {
        let config = CookieConfig {
            secure: false,
            ..CookieConfig::default()
        };
        let jar = set_session_cookies(CookieJar::new(), &pair(), &config);
        let access = jar.get(ACCESS_COOKIE).unwrap();
        assert_eq!(access.secure(), Some(false));
        assert_eq!(access.same_site(), Some(SameSite::Lax));
    }
}
