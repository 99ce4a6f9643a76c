//! Repository for the `user_sessions` table.
//!
//! Both writes are a single upsert statement, so each one is atomic on its
//! own. There is deliberately no version column: the last write wins.

use sqlx::PgPool;

use crate::models::session::SessionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, access_token, refresh_token, updated_at";

/// Provides the write path and audit read for per-user sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Create or overwrite the session row for a user.
    ///
    /// A missing user surfaces as a foreign-key violation (`23503`).
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_sessions (user_id, access_token, refresh_token, updated_at)
             VALUES ($1, $2, $3, NOW())
             ON CONFLICT (user_id) DO UPDATE SET
                access_token = EXCLUDED.access_token,
                refresh_token = EXCLUDED.refresh_token,
                updated_at = NOW()",
        )
        .bind(user_id)
        .bind(access_token)
        .bind(refresh_token)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Blank both tokens for a user (logout).
    pub async fn clear(pool: &PgPool, user_id: &str) -> Result<(), sqlx::Error> {
        Self::upsert(pool, user_id, "", "").await
    }

    /// Find the session row for a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_sessions WHERE user_id = $1");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
