//! Recommendation entity model and read projections.

use learnpath_core::recommendation::ports::ActiveRecommendation;
use learnpath_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recommendations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recommendation {
    pub id: DbId,
    pub student_id: DbId,
    pub lesson_id: DbId,
    pub reason: String,
    pub priority: i32,
    pub is_dismissed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A non-dismissed recommendation joined with its lesson and course.
#[derive(Debug, Clone, FromRow)]
pub struct ActiveRecommendationRow {
    pub id: DbId,
    pub lesson_id: DbId,
    pub lesson_title: String,
    pub course_id: DbId,
    pub course_title: String,
    pub estimated_minutes: i32,
    pub reason: String,
    pub priority: i32,
    pub created_at: Timestamp,
}

impl From<ActiveRecommendationRow> for ActiveRecommendation {
    fn from(row: ActiveRecommendationRow) -> Self {
        Self {
            id: row.id,
            lesson_id: row.lesson_id,
            lesson_title: row.lesson_title,
            course_id: row.course_id,
            course_title: row.course_title,
            estimated_minutes: row.estimated_minutes,
            reason: row.reason,
            priority: row.priority,
            created_at: row.created_at,
        }
    }
}
