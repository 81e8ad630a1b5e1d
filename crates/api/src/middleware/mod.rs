//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::RequireAdmin`] -- Requires the `admin` role.
//! - [`auth::MaybeAdmin`] -- Optional admin, for routes with admin-widened behavior.

pub mod auth;
