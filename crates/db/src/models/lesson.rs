//! Lesson entity model and DTOs.

use learnpath_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `lessons` table. `order` is unique within a course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub order: i32,
    pub estimated_minutes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A lesson with one student's progress on it. Lessons the student never
/// touched report `not_started` and zero minutes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonWithProgress {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub order: i32,
    pub estimated_minutes: i32,
    pub status: String,
    pub time_spent_minutes: i32,
    pub completed_at: Option<Timestamp>,
    pub last_accessed: Option<Timestamp>,
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateLesson {
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub order: i32,
    pub estimated_minutes: i32,
}
