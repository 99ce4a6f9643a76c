//! The authenticated principal and its stored user record.

use serde::{Deserialize, Serialize};

use crate::types::{Timestamp, UserId};

/// The authenticated principal's attributes.
///
/// Loaded from the user store at login/refresh time and embedded in every
/// issued credential. Never persisted by the auth subsystem itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Role name (e.g. `"admin"`, `"user"`). See [`crate::roles`].
    pub role: String,
}

/// A user as held by the user store: the identity plus its password hash.
///
/// Contains the password hash -- NEVER serialize this to API responses.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub identity: Identity,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub password_hash: String,
}
