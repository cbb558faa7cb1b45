//! Repository for the `courses` table.

use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseProgressRow, CreateCourse};

const COLUMNS: &str = "\
    id, title, description, category, difficulty, estimated_hours, \
    is_published, created_at, updated_at";

pub struct CourseRepo;

impl CourseRepo {
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses \
                (title, description, category, difficulty, estimated_hours, is_published) \
             VALUES ($1, COALESCE($2, ''), COALESCE($3, 'other'), $4, COALESCE($5, 1), $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.difficulty)
            .bind(input.estimated_hours)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// All published courses, alphabetical by title (id breaks ties).
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM courses WHERE is_published ORDER BY title, id");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Published courses in title order with the student's completed lesson
    /// count and total minutes per course.
    pub async fn list_with_student_progress(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<CourseProgressRow>, sqlx::Error> {
        sqlx::query_as::<_, CourseProgressRow>(
            "SELECT c.id, c.title, c.description, c.category, c.difficulty, c.estimated_hours, \
                    COUNT(l.id)::INT AS total_lessons, \
                    COUNT(p.id) FILTER (WHERE p.status = 'completed')::INT AS completed_lessons, \
                    COALESCE(SUM(p.time_spent_minutes), 0)::INT AS time_spent_minutes \
             FROM courses c \
             LEFT JOIN lessons l ON l.course_id = c.id \
             LEFT JOIN progress p ON p.lesson_id = l.id AND p.student_id = $1 \
             WHERE c.is_published \
             GROUP BY c.id \
             ORDER BY c.title, c.id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }
}
