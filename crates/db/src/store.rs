//! Postgres implementation of the recommendation engine's ports.

use async_trait::async_trait;
use learnpath_core::error::CoreError;
use learnpath_core::learning::{Difficulty, ProgressStatus};
use learnpath_core::recommendation::ports::{
    ActiveRecommendation, CourseCatalog, CourseSummary, LessonSummary, ProgressEntry,
    ProgressStore, RecommendationStore,
};
use learnpath_core::recommendation::Candidate;
use learnpath_core::types::{DbId, Timestamp};

use crate::repositories::{
    ActivityRepo, CourseRepo, LessonRepo, ProgressRepo, RecommendationRepo,
};
use crate::DbPool;

/// Serves all three engine ports from one connection pool.
#[derive(Clone)]
pub struct PgLearningStore {
    pool: DbPool,
}

impl PgLearningStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn internal(e: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("Database error: {e}"))
}

#[async_trait]
impl CourseCatalog for PgLearningStore {
    async fn published_courses(&self) -> Result<Vec<CourseSummary>, CoreError> {
        CourseRepo::list_published(&self.pool)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|c| {
                Ok(CourseSummary {
                    id: c.id,
                    difficulty: Difficulty::from_str(&c.difficulty)?,
                    title: c.title,
                })
            })
            .collect()
    }

    async fn course_lessons(&self, course_id: DbId) -> Result<Vec<LessonSummary>, CoreError> {
        let lessons = LessonRepo::list_for_course(&self.pool, course_id)
            .await
            .map_err(internal)?;
        Ok(lessons
            .into_iter()
            .map(|l| LessonSummary {
                id: l.id,
                course_id: l.course_id,
                title: l.title,
                order: l.order,
                estimated_minutes: l.estimated_minutes,
            })
            .collect())
    }
}

#[async_trait]
impl ProgressStore for PgLearningStore {
    async fn student_progress(&self, student_id: DbId) -> Result<Vec<ProgressEntry>, CoreError> {
        ProgressRepo::list_with_lessons(&self.pool, student_id)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|p| {
                Ok(ProgressEntry {
                    lesson_id: p.lesson_id,
                    course_id: p.course_id,
                    status: ProgressStatus::from_str(&p.status)?,
                    time_spent_minutes: p.time_spent_minutes,
                    estimated_minutes: p.estimated_minutes,
                    last_accessed: p.last_accessed,
                })
            })
            .collect()
    }

    async fn recent_activity_course_ids(
        &self,
        student_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<DbId>, CoreError> {
        ActivityRepo::recent_course_ids(&self.pool, student_id, since)
            .await
            .map_err(internal)
    }
}

#[async_trait]
impl RecommendationStore for PgLearningStore {
    async fn replace_for_student(
        &self,
        student_id: DbId,
        recommendations: &[Candidate],
    ) -> Result<usize, CoreError> {
        RecommendationRepo::replace_for_student(&self.pool, student_id, recommendations)
            .await
            .map_err(internal)
    }

    async fn active_for_student(
        &self,
        student_id: DbId,
    ) -> Result<Vec<ActiveRecommendation>, CoreError> {
        let rows = RecommendationRepo::list_active(&self.pool, student_id)
            .await
            .map_err(internal)?;
        Ok(rows.into_iter().map(ActiveRecommendation::from).collect())
    }

    async fn dismiss(&self, student_id: DbId, recommendation_id: DbId) -> Result<bool, CoreError> {
        RecommendationRepo::dismiss(&self.pool, student_id, recommendation_id)
            .await
            .map_err(internal)
    }
}
