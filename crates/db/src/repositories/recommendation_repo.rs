//! Repository for the `recommendations` table.

use learnpath_core::recommendation::Candidate;
use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::recommendation::{ActiveRecommendationRow, Recommendation};

const COLUMNS: &str = "\
    id, student_id, lesson_id, reason, priority, is_dismissed, created_at, updated_at";

/// Provides the replace / list / dismiss lifecycle for recommendations.
pub struct RecommendationRepo;

impl RecommendationRepo {
    /// Delete every recommendation of the student, dismissed or not, and
    /// insert `candidates` in order, within one transaction.
    ///
    /// Returns the number of rows inserted.
    pub async fn replace_for_student(
        pool: &PgPool,
        student_id: DbId,
        candidates: &[Candidate],
    ) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM recommendations WHERE student_id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for candidate in candidates {
            sqlx::query(
                "INSERT INTO recommendations (student_id, lesson_id, reason, priority) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(student_id)
            .bind(candidate.lesson_id)
            .bind(&candidate.reason)
            .bind(candidate.priority)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            student_id,
            deleted,
            inserted = candidates.len(),
            "Recommendations replaced"
        );
        Ok(candidates.len())
    }

    /// Every row of the student, dismissed included.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Recommendation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recommendations WHERE student_id = $1 \
             ORDER BY priority DESC, created_at DESC, id"
        );
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Non-dismissed rows with lesson and course details, highest priority
    /// first, newest first among equals.
    pub async fn list_active(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<ActiveRecommendationRow>, sqlx::Error> {
        sqlx::query_as::<_, ActiveRecommendationRow>(
            "SELECT r.id, r.lesson_id, l.title AS lesson_title, l.course_id, \
                    c.title AS course_title, l.estimated_minutes, r.reason, \
                    r.priority, r.created_at \
             FROM recommendations r \
             JOIN lessons l ON l.id = r.lesson_id \
             JOIN courses c ON c.id = l.course_id \
             WHERE r.student_id = $1 AND NOT r.is_dismissed \
             ORDER BY r.priority DESC, r.created_at DESC, r.id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }

    /// Mark one of the student's recommendations dismissed.
    ///
    /// Returns `false` if no row with `id` belongs to `student_id`.
    pub async fn dismiss(pool: &PgPool, student_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE recommendations SET is_dismissed = TRUE \
             WHERE id = $1 AND student_id = $2",
        )
        .bind(id)
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
