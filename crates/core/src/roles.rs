//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users_table.sql`.

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_MENTOR: &str = "mentor";
