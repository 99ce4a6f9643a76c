//! Credential-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use marquee_core::identity::Identity;
use marquee_core::roles::ROLE_ADMIN;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, verified by [`crate::auth::gate::AuthGate`].
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id(), role = %user.role(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
}

impl AuthUser {
    pub fn user_id(&self) -> &str {
        &self.identity.user_id
    }

    pub fn role(&self) -> &str {
        &self.identity.role
    }

    pub fn is_admin(&self) -> bool {
        self.identity.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = state.gate.authenticate(&parts.headers, Utc::now())?;
        Ok(AuthUser { identity })
    }
}
