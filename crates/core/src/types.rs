/// Users are keyed by an opaque, stable string id (UUID v4 text in practice).
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
