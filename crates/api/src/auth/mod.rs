//! Bearer token handling.
//!
//! Tokens are issued by an external identity service; this crate only
//! validates them. [`jwt::generate_access_token`] exists for tooling and
//! tests that need a token signed with the shared secret.

pub mod jwt;
