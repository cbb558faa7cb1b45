//! Repository for the append-only `activities` table.

use learnpath_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::activity::Activity;

const COLUMNS: &str = "\
    id, student_id, lesson_id, event_type, occurred_at, activity_date, \
    duration_minutes, created_at";

pub struct ActivityRepo;

impl ActivityRepo {
    /// Append one event. Accepts a pool or an open transaction.
    pub async fn log<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: DbId,
        event_type: &str,
        lesson_id: Option<DbId>,
        duration_minutes: i32,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (student_id, lesson_id, event_type, duration_minutes) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(student_id)
            .bind(lesson_id)
            .bind(event_type)
            .bind(duration_minutes)
            .fetch_one(executor)
            .await
    }

    /// Most recent events first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
        limit: i64,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities WHERE student_id = $1 \
             ORDER BY occurred_at DESC, id DESC LIMIT $2"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(student_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Distinct courses the student touched through a lesson-scoped event
    /// at or after `since`.
    pub async fn recent_course_ids(
        pool: &PgPool,
        student_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT l.course_id \
             FROM activities a \
             JOIN lessons l ON l.id = a.lesson_id \
             WHERE a.student_id = $1 AND a.occurred_at >= $2 \
             ORDER BY l.course_id",
        )
        .bind(student_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
