//! Repository for the `progress` table.

use chrono::Utc;
use learnpath_core::learning::{ActivityEventType, ProgressStatus};
use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress::{Progress, ProgressWithLesson, UpdateProgress};
use crate::repositories::ActivityRepo;

const COLUMNS: &str = "\
    id, student_id, lesson_id, status, time_spent_minutes, notes, \
    last_accessed, completed_at, created_at, updated_at";

pub struct ProgressRepo;

impl ProgressRepo {
    pub async fn find(
        pool: &PgPool,
        student_id: DbId,
        lesson_id: DbId,
    ) -> Result<Option<Progress>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM progress WHERE student_id = $1 AND lesson_id = $2");
        sqlx::query_as::<_, Progress>(&query)
            .bind(student_id)
            .bind(lesson_id)
            .fetch_optional(pool)
            .await
    }

    /// Every progress row of the student, most recently accessed first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Progress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progress WHERE student_id = $1 \
             ORDER BY last_accessed DESC, id DESC"
        );
        sqlx::query_as::<_, Progress>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Progress rows joined with their lesson's course and estimate.
    pub async fn list_with_lessons(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<ProgressWithLesson>, sqlx::Error> {
        sqlx::query_as::<_, ProgressWithLesson>(
            "SELECT p.lesson_id, l.course_id, p.status, p.time_spent_minutes, \
                    l.estimated_minutes, p.last_accessed \
             FROM progress p \
             JOIN lessons l ON l.id = p.lesson_id \
             WHERE p.student_id = $1 \
             ORDER BY p.id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }

    /// Apply a progress update, creating the row in `in_progress` if absent.
    ///
    /// - A status change to `completed` stamps `completed_at` once and logs a
    ///   `lesson_complete` activity carrying the reported time.
    /// - `time_spent` is added to the running total.
    /// - `notes` replaces the previous notes when present.
    /// - `last_accessed` is always refreshed.
    ///
    /// All of it commits or rolls back together.
    pub async fn apply_update(
        pool: &PgPool,
        student_id: DbId,
        lesson_id: DbId,
        input: &UpdateProgress,
    ) -> Result<Progress, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO progress (student_id, lesson_id, status) VALUES ($1, $2, $3) \
             ON CONFLICT (student_id, lesson_id) DO NOTHING",
        )
        .bind(student_id)
        .bind(lesson_id)
        .bind(ProgressStatus::InProgress.as_str())
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM progress \
             WHERE student_id = $1 AND lesson_id = $2 FOR UPDATE"
        );
        let current = sqlx::query_as::<_, Progress>(&query)
            .bind(student_id)
            .bind(lesson_id)
            .fetch_one(&mut *tx)
            .await?;

        let now = Utc::now();
        let completing = input.status.as_deref() == Some(ProgressStatus::Completed.as_str())
            && current.completed_at.is_none();

        let status = input.status.clone().unwrap_or(current.status);
        let completed_at = if completing { Some(now) } else { current.completed_at };
        let time_spent = current.time_spent_minutes + input.time_spent.unwrap_or(0);
        let notes = input.notes.clone().unwrap_or(current.notes);

        let query = format!(
            "UPDATE progress SET \
                status = $1, time_spent_minutes = $2, notes = $3, \
                completed_at = $4, last_accessed = $5 \
             WHERE id = $6 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Progress>(&query)
            .bind(&status)
            .bind(time_spent)
            .bind(&notes)
            .bind(completed_at)
            .bind(now)
            .bind(current.id)
            .fetch_one(&mut *tx)
            .await?;

        if completing {
            ActivityRepo::log(
                &mut *tx,
                student_id,
                ActivityEventType::LessonComplete.as_str(),
                Some(lesson_id),
                input.time_spent.unwrap_or(0),
            )
            .await?;
        }

        tx.commit().await?;
        Ok(updated)
    }
}
