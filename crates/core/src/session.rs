//! The per-user session record.

use serde::Serialize;

use crate::types::{Timestamp, UserId};

/// Server-side bookkeeping of the latest issued credential pair for a user.
///
/// Exactly one record exists per user. It is overwritten on every login and
/// refresh and has its token fields blanked on logout. Request-time
/// authorization never reads it; it exists for rotation and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
    pub updated_at: Timestamp,
}

impl SessionRecord {
    /// Whether the record currently holds a live token pair (i.e. not logged out).
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(access: &str, refresh: &str) -> SessionRecord {
        SessionRecord {
            user_id: "u-1".to_string(),
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn cleared_record_is_inactive() {
        assert!(!record("", "").is_active());
        assert!(record("a", "r").is_active());
    }
}
