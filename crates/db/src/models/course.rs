//! Course entity model and DTOs.

use learnpath_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub estimated_hours: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A published course with one student's lesson counts and time totals.
#[derive(Debug, Clone, FromRow)]
pub struct CourseProgressRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub estimated_hours: i32,
    pub total_lessons: i32,
    pub completed_lessons: i32,
    pub time_spent_minutes: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: String,
    pub estimated_hours: Option<i32>,
    pub is_published: bool,
}
