//! Handlers for protected account resources.

use axum::extract::{Path, State};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::identity::Identity;
use marquee_core::session::SessionRecord;
use marquee_core::types::UserId;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/auth/me
///
/// The identity carried by the caller's access credential.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<DataResponse<Identity>> {
    Json(DataResponse {
        data: user.identity,
    })
}

/// GET /api/v1/admin/sessions/{user_id}
///
/// The stored session record for a user. Admin only.
pub async fn session_audit(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<DataResponse<SessionRecord>>> {
    let record = state
        .lifecycle
        .session_record(&user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Session",
                id: user_id.clone(),
            })
        })?;

    tracing::info!(admin_id = %admin.user_id(), user_id = %user_id, "Session record audited");
    Ok(Json(DataResponse { data: record }))
}
