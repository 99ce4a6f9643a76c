//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET /sessions/{user_id} -> session_audit
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/sessions/{user_id}", get(account::session_audit))
}
