//! Domain types, validation, and the recommendation engine for learnpath.
//!
//! This crate has no database or HTTP dependencies. Storage is reached only
//! through the ports in [`recommendation::ports`].

pub mod error;
pub mod learning;
pub mod recommendation;
pub mod roles;
pub mod types;
