//! User session row.

use marquee_core::session::SessionRecord;
use marquee_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub updated_at: Timestamp,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        SessionRecord {
            user_id: row.user_id,
            access_token: row.access_token,
            refresh_token: row.refresh_token,
            updated_at: row.updated_at,
        }
    }
}
