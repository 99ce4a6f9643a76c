//! Collaborator traits for user and session persistence.
//!
//! The auth subsystem never talks to a database directly. It consumes these
//! traits so that the PostgreSQL and in-memory implementations in
//! `marquee-db` are interchangeable.

use async_trait::async_trait;

use crate::identity::{NewUser, UserRecord};
use crate::session::SessionRecord;

/// Errors surfaced by store implementations. Never swallowed by callers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Read/write access to user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by email (case-sensitive). `Ok(None)` when absent.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Find a user by id. `Ok(None)` when absent.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a new user. Fails with [`StoreError::Conflict`] if the email is taken.
    async fn create(&self, input: &NewUser) -> Result<UserRecord, StoreError>;
}

/// The single authoritative write path for per-user session records.
///
/// Writes are last-write-wins: there is no version check, so concurrent
/// writers for the same user race and the later write is kept. Each call is
/// one atomic write.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Overwrite the user's session with a new token pair, stamping `updated_at`.
    ///
    /// Fails with [`StoreError::NotFound`] if the user does not exist.
    async fn put(
        &self,
        user_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), StoreError>;

    /// Blank both tokens for the user. Calling it again is a no-op.
    ///
    /// Fails with [`StoreError::NotFound`] if the user does not exist.
    async fn clear(&self, user_id: &str) -> Result<(), StoreError>;

    /// Read the current session record for audit.
    async fn find(&self, user_id: &str) -> Result<Option<SessionRecord>, StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
