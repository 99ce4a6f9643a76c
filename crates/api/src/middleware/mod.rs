//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- The authenticated identity from a bearer header or access cookie.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user; used by `/auth/me`.

pub mod auth;
pub mod rbac;
