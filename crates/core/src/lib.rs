//! Domain types shared by the Marquee auth service crates.
//!
//! - [`identity`] -- the authenticated principal and the stored user record.
//! - [`session`] -- the per-user session record (revocation ledger).
//! - [`store`] -- collaborator traits for user and session persistence.
//! - [`validation`] -- input validation for registration.

pub mod error;
pub mod identity;
pub mod roles;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;
