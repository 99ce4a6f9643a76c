//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{account, auth};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST     /register  -> register
/// POST     /login     -> login
/// GET|POST /refresh   -> refresh
/// POST     /logout    -> logout
/// GET      /me        -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", get(auth::refresh).post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(account::me))
}
