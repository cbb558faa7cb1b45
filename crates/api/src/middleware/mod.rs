//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer token.
//! - [`rbac::RequireAuth`] -- any authenticated user.
//! - [`rbac::RequireStudent`] -- the `student` role.

pub mod auth;
pub mod rbac;
