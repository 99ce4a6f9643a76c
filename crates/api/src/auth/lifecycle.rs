//! Login, refresh, logout and registration.
//!
//! A user's session moves Anonymous -> Active on login, Active -> Active on
//! refresh (new pair), and back to Anonymous on logout. An expired access
//! credential leaves the session pending refresh: a valid refresh credential
//! returns it to Active, otherwise the client must log in again.
//!
//! The session store write is last-write-wins. Two racing logins or refreshes
//! for the same user both succeed and the record keeps whichever pair was
//! written last. Old refresh credentials are overwritten, not blacklisted.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use marquee_core::identity::{Identity, NewUser};
use marquee_core::roles::ROLE_USER;
use marquee_core::session::SessionRecord;
use marquee_core::store::{SessionStore, StoreError, UserStore};

use crate::auth::error::AuthError;
use crate::auth::gate::AuthGate;
use crate::auth::issuer::{TokenIssuer, TokenPair};
use crate::auth::password::{hash_password, verify_password, DUMMY_HASH};

/// An authenticated session handed to the transport layer.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    pub tokens: TokenPair,
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Orchestrates the session state machine over the user and session stores.
pub struct SessionLifecycle {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    issuer: TokenIssuer,
    gate: AuthGate,
    store_timeout: Duration,
}

impl SessionLifecycle {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        issuer: TokenIssuer,
        gate: AuthGate,
        store_timeout: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            issuer,
            gate,
            store_timeout,
        }
    }

    /// Run a store call under the configured deadline.
    async fn with_deadline<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, AuthError> {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(result) => result.map_err(AuthError::from),
            Err(_) => {
                tracing::error!(op, timeout = ?self.store_timeout, "Store call timed out");
                Err(AuthError::Timeout(self.store_timeout))
            }
        }
    }

    /// Issue a fresh pair for `identity` and make it the user's current session.
    async fn start_session(&self, identity: Identity) -> Result<Session, AuthError> {
        let tokens = self.issuer.issue(&identity, Utc::now())?;
        self.with_deadline(
            "session.put",
            self.sessions
                .put(&identity.user_id, &tokens.access_token, &tokens.refresh_token),
        )
        .await?;
        Ok(Session { identity, tokens })
    }

    /// Create a user with role `user`. Input must already be validated.
    pub async fn register(&self, input: Registration) -> Result<Identity, AuthError> {
        let password_hash = hash_password(&input.password)
            .map_err(|e| AuthError::Configuration(format!("password hashing failed: {e}")))?;

        let new_user = NewUser {
            email: input.email,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            role: ROLE_USER.to_string(),
            password_hash,
        };
        let record = self
            .with_deadline("user.create", self.users.create(&new_user))
            .await?;

        tracing::info!(user_id = %record.identity.user_id, "User registered");
        Ok(record.identity)
    }

    /// Anonymous -> Active.
    ///
    /// An unknown email and a wrong password both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let Some(user) = self
            .with_deadline("user.find_by_email", self.users.find_by_email(email))
            .await?
        else {
            let _ = verify_password(password, DUMMY_HASH);
            tracing::warn!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let password_valid = verify_password(password, &user.password_hash).map_err(|e| {
            AuthError::Storage(format!(
                "stored password hash for {} is unusable: {e}",
                user.identity.user_id
            ))
        })?;
        if !password_valid {
            tracing::warn!(user_id = %user.identity.user_id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.start_session(user.identity).await?;
        tracing::info!(user_id = %session.identity.user_id, "User logged in");
        Ok(session)
    }

    /// Active -> Active with a new pair.
    ///
    /// Any failure to validate the refresh credential, including expiry, is
    /// [`AuthError::Unauthenticated`]; the client must log in again. The
    /// identity is re-read from the user store so role or name changes take
    /// effect on rotation.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let claims = self
            .gate
            .verify_refresh(refresh_token, Utc::now())
            .map_err(|e| match e {
                AuthError::Expired => {
                    AuthError::Unauthenticated("refresh credential expired".into())
                }
                other => other,
            })?;

        let Some(user) = self
            .with_deadline("user.find_by_id", self.users.find_by_id(&claims.sub))
            .await?
        else {
            return Err(AuthError::Unauthenticated(format!(
                "user {} no longer exists",
                claims.sub
            )));
        };

        let session = self.start_session(user.identity).await?;
        tracing::info!(user_id = %session.identity.user_id, "Session refreshed");
        Ok(session)
    }

    /// Active -> Anonymous. Idempotent.
    ///
    /// Outstanding access credentials are NOT revoked: they remain accepted
    /// by the gate until their own expiry.
    pub async fn logout(&self, user_id: &str) -> Result<(), AuthError> {
        self.with_deadline("session.clear", self.sessions.clear(user_id))
            .await?;
        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// The user's current session record, for audit.
    pub async fn session_record(&self, user_id: &str) -> Result<Option<SessionRecord>, AuthError> {
        self.with_deadline("session.find", self.sessions.find(user_id))
            .await
    }

    /// Probe the session store.
    pub async fn ping(&self) -> Result<(), AuthError> {
        self.with_deadline("session.ping", self.sessions.ping()).await
    }
}
