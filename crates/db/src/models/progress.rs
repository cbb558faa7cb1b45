//! Progress entity model and DTOs.

use learnpath_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `progress` table, unique per `(student_id, lesson_id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Progress {
    pub id: DbId,
    pub student_id: DbId,
    pub lesson_id: DbId,
    pub status: String,
    pub time_spent_minutes: i32,
    pub notes: String,
    pub last_accessed: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Progress joined with the owning lesson's course and estimate.
#[derive(Debug, Clone, FromRow)]
pub struct ProgressWithLesson {
    pub lesson_id: DbId,
    pub course_id: DbId,
    pub status: String,
    pub time_spent_minutes: i32,
    pub estimated_minutes: i32,
    pub last_accessed: Timestamp,
}

/// A progress change reported by a student.
///
/// `time_spent` is an increment added to the running total, not a new total.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProgress {
    pub status: Option<String>,
    pub time_spent: Option<i32>,
    pub notes: Option<String>,
}
