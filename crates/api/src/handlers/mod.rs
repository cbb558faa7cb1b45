pub mod activity;
pub mod courses;
pub mod progress;
pub mod recommendations;
