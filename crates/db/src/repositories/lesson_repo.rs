//! Repository for the `lessons` table.

use learnpath_core::learning::ProgressStatus;
use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::lesson::{CreateLesson, Lesson, LessonWithProgress};

/// `order` is a reserved word and must stay quoted.
const COLUMNS: &str = "\
    id, course_id, title, description, content_type, \"order\", \
    estimated_minutes, created_at, updated_at";

pub struct LessonRepo;

impl LessonRepo {
    /// Insert a lesson. Fails with `uq_lessons_course_order` when the
    /// position is already taken in the course.
    pub async fn create(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO lessons \
                (course_id, title, description, content_type, \"order\", estimated_minutes) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, 'reading'), $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content_type)
            .bind(input.order)
            .bind(input.estimated_minutes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lessons WHERE id = $1");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lessons of one course, first to last.
    pub async fn list_for_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Lesson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lessons WHERE course_id = $1 ORDER BY \"order\""
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Lessons of one course, first to last, each with the student's progress.
    pub async fn list_with_student_progress(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<Vec<LessonWithProgress>, sqlx::Error> {
        sqlx::query_as::<_, LessonWithProgress>(
            "SELECT l.id, l.title, l.description, l.content_type, l.\"order\", \
                    l.estimated_minutes, \
                    COALESCE(p.status, $3) AS status, \
                    COALESCE(p.time_spent_minutes, 0) AS time_spent_minutes, \
                    p.completed_at, p.last_accessed, \
                    COALESCE(p.notes, '') AS notes \
             FROM lessons l \
             LEFT JOIN progress p ON p.lesson_id = l.id AND p.student_id = $2 \
             WHERE l.course_id = $1 \
             ORDER BY l.\"order\"",
        )
        .bind(course_id)
        .bind(student_id)
        .bind(ProgressStatus::NotStarted.as_str())
        .fetch_all(pool)
        .await
    }
}
