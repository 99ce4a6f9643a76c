//! In-process implementation of the store traits.
//!
//! Users and sessions live behind one `RwLock`, so the "user exists" check and
//! the session write happen under the same guard and each `put`/`clear` is a
//! single atomic write, matching the PostgreSQL upsert.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use marquee_core::identity::{Identity, NewUser, UserRecord};
use marquee_core::session::SessionRecord;
use marquee_core::store::{SessionStore, StoreError, UserStore};
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    /// email -> user_id
    emails: HashMap<String, String>,
    sessions: HashMap<String, SessionRecord>,
}

/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared as both the user store and the session store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users held.
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }

    async fn write_session(
        &self,
        user_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(user_id) {
            return Err(StoreError::NotFound {
                entity: "User",
                id: user_id.to_string(),
            });
        }
        inner.sessions.insert(
            user_id.to_string(),
            SessionRecord {
                user_id: user_id.to_string(),
                access_token: access_token.to_string(),
                refresh_token: refresh_token.to_string(),
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .emails
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.inner.read().await.users.get(user_id).cloned())
    }

    async fn create(&self, input: &NewUser) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.emails.contains_key(&input.email) {
            return Err(StoreError::Conflict(format!(
                "User with email {} already exists",
                input.email
            )));
        }

        let now = Utc::now();
        let record = UserRecord {
            identity: Identity {
                user_id: uuid::Uuid::new_v4().to_string(),
                email: input.email.clone(),
                first_name: input.first_name.clone(),
                last_name: input.last_name.clone(),
                role: input.role.clone(),
            },
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        let user_id = record.identity.user_id.clone();
        inner.emails.insert(input.email.clone(), user_id.clone());
        inner.users.insert(user_id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn put(
        &self,
        user_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), StoreError> {
        self.write_session(user_id, access_token, refresh_token).await
    }

    async fn clear(&self, user_id: &str) -> Result<(), StoreError> {
        self.write_session(user_id, "", "").await
    }

    async fn find(&self, user_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self.inner.read().await.sessions.get(user_id).cloned())
    }
}
