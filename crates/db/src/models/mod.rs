//! Row models and DTOs, one module per table.

pub mod activity;
pub mod course;
pub mod lesson;
pub mod progress;
pub mod recommendation;
pub mod user;
