//! Store contracts consumed by the recommendation engine.
//!
//! The engine never talks to a database directly. It is handed one
//! implementation of each trait at construction time; `learnpath-db`
//! provides the Postgres implementation and the engine tests use in-memory
//! fakes.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::learning::{Difficulty, ProgressStatus};
use crate::recommendation::Candidate;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

/// A published course as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub id: DbId,
    pub title: String,
    pub difficulty: Difficulty,
}

/// One lesson of a course, positioned by `order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSummary {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub order: i32,
    pub estimated_minutes: i32,
}

/// One `(student, lesson)` progress row joined with the lesson metadata the
/// strategies need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    pub lesson_id: DbId,
    pub course_id: DbId,
    pub status: ProgressStatus,
    pub time_spent_minutes: i32,
    pub estimated_minutes: i32,
    pub last_accessed: Timestamp,
}

/// A non-dismissed recommendation with the lesson and course details a
/// client needs to render it.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveRecommendation {
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

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Read access to courses and their ordered lessons.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// All published courses, alphabetical by title with id breaking ties.
    async fn published_courses(&self) -> Result<Vec<CourseSummary>, CoreError>;

    /// Lessons of one course in ascending `order`.
    async fn course_lessons(&self, course_id: DbId) -> Result<Vec<LessonSummary>, CoreError>;
}

/// Read access to a student's progress and activity history.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Every progress row the student has, in any status.
    async fn student_progress(&self, student_id: DbId) -> Result<Vec<ProgressEntry>, CoreError>;

    /// Distinct course ids with at least one lesson-scoped activity at or
    /// after `since`.
    async fn recent_activity_course_ids(
        &self,
        student_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<DbId>, CoreError>;
}

/// Ownership of persisted recommendation rows.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Delete every recommendation of the student (dismissed or not) and
    /// insert `recommendations`, atomically. Returns the number inserted.
    async fn replace_for_student(
        &self,
        student_id: DbId,
        recommendations: &[Candidate],
    ) -> Result<usize, CoreError>;

    /// Non-dismissed recommendations, highest priority first.
    async fn active_for_student(
        &self,
        student_id: DbId,
    ) -> Result<Vec<ActiveRecommendation>, CoreError>;

    /// Mark one recommendation dismissed. Returns `false` when no row with
    /// `recommendation_id` belongs to `student_id`.
    async fn dismiss(&self, student_id: DbId, recommendation_id: DbId) -> Result<bool, CoreError>;
}
