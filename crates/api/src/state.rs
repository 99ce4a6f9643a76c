use std::sync::Arc;

use marquee_core::store::{SessionStore, UserStore};

use crate::auth::gate::AuthGate;
use crate::auth::issuer::TokenIssuer;
use crate::auth::lifecycle::SessionLifecycle;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Everything a handler needs is reachable from here; there are no process-wide
/// globals.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Stateless credential verifier used by the auth extractors.
    pub gate: AuthGate,
    /// Login / refresh / logout orchestration.
    pub lifecycle: Arc<SessionLifecycle>,
}

impl AppState {
    /// Wire the auth components over the given stores.
    pub fn new(
        config: ServerConfig,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let jwt = Arc::new(config.jwt.clone());
        let gate = AuthGate::new(Arc::clone(&jwt));
        let lifecycle = SessionLifecycle::new(
            users,
            sessions,
            TokenIssuer::new(jwt),
            gate.clone(),
            config.store_timeout(),
        );

        Self {
            config: Arc::new(config),
            gate,
            lifecycle: Arc::new(lifecycle),
        }
    }
}
