//! Authentication primitives and the session lifecycle.
//!
//! - [`jwt`] -- credential claims, HS256 encode/decode, signing config.
//! - [`issuer`] -- mints access/refresh credential pairs.
//! - [`gate`] -- request-time credential extraction and verification.
//! - [`lifecycle`] -- login, refresh, logout and registration.
//! - [`cookies`] -- session cookie construction.
//! - [`password`] -- Argon2id password hashing and verification.

pub mod cookies;
pub mod error;
pub mod gate;
pub mod issuer;
pub mod jwt;
pub mod lifecycle;
pub mod password;
