//! PostgreSQL-backed implementation of the store traits.

use async_trait::async_trait;
use marquee_core::identity::{NewUser, UserRecord};
use marquee_core::session::SessionRecord;
use marquee_core::store::{SessionStore, StoreError, UserStore};

use crate::repositories::{SessionRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL foreign-key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Classify a sqlx error for an operation on `user_id`.
///
/// - Foreign-key violations mean the user row does not exist.
/// - Unique violations on `uq_` constraints are conflicts.
/// - Everything else is an opaque storage failure.
fn classify(err: sqlx::Error, user_id: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => {
                return StoreError::NotFound {
                    entity: "User",
                    id: user_id.to_string(),
                };
            }
            Some(UNIQUE_VIOLATION) => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return StoreError::Conflict(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    ));
                }
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    StoreError::Storage(err.to_string())
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(|e| classify(e, email))?;
        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = UserRepo::find_by_id(&self.pool, user_id)
            .await
            .map_err(|e| classify(e, user_id))?;
        Ok(row.map(Into::into))
    }

    async fn create(&self, input: &NewUser) -> Result<UserRecord, StoreError> {
        let row = UserRepo::create(&self.pool, input)
            .await
            .map_err(|e| classify(e, &input.email))?;
        Ok(row.into())
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn put(
        &self,
        user_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), StoreError> {
        SessionRepo::upsert(&self.pool, user_id, access_token, refresh_token)
            .await
            .map_err(|e| classify(e, user_id))
    }

    async fn clear(&self, user_id: &str) -> Result<(), StoreError> {
        SessionRepo::clear(&self.pool, user_id)
            .await
            .map_err(|e| classify(e, user_id))
    }

    async fn find(&self, user_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        let row = SessionRepo::find_by_user(&self.pool, user_id)
            .await
            .map_err(|e| classify(e, user_id))?;
        Ok(row.map(Into::into))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))
    }
}
