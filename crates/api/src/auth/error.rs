use std::time::Duration;

use marquee_core::store::StoreError;

use crate::auth::jwt::CodecError;

/// Failures of the auth subsystem.
///
/// Variants carry detail for logs only; `AppError` decides what reaches the
/// client (see `crate::error`).
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No credential, a forged/malformed/wrong-kind credential, or an
    /// identity that no longer resolves.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Login with an unknown email or a wrong password. The two are not
    /// distinguished.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Authentic access credential past its expiry. The client should refresh.
    #[error("Credential expired")]
    Expired,

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Store operation exceeded its {0:?} deadline")]
    Timeout(Duration),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => AuthError::NotFound { entity, id },
            StoreError::Conflict(msg) => AuthError::Conflict(msg),
            StoreError::Storage(msg) => AuthError::Storage(msg),
        }
    }
}

impl From<CodecError> for AuthError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Signing(msg) => AuthError::Configuration(msg),
            other => AuthError::Unauthenticated(other.to_string()),
        }
    }
}
