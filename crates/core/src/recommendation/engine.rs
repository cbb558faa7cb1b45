//! Recommendation orchestration: run the strategies, rank, and replace the
//! student's stored set.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;

use crate::error::CoreError;
use crate::recommendation::ports::{
    ActiveRecommendation, CourseCatalog, ProgressStore, RecommendationStore,
};
use crate::recommendation::strategies::{self, StrategyContext};
use crate::recommendation::{
    rank, validate_limit, Candidate, Strategy, DEFAULT_RECENT_ACTIVITY_DAYS,
};
use crate::types::{DbId, Timestamp};

/// Tunables for a [`RecommendationEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Days of activity that mark a course as recently engaged.
    pub recent_activity_window_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recent_activity_window_days: DEFAULT_RECENT_ACTIVITY_DAYS,
        }
    }
}

/// Rule-based recommendation engine over injected stores.
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<dyn CourseCatalog>,
    progress: Arc<dyn ProgressStore>,
    store: Arc<dyn RecommendationStore>,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(
        catalog: Arc<dyn CourseCatalog>,
        progress: Arc<dyn ProgressStore>,
        store: Arc<dyn RecommendationStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            progress,
            store,
            config,
        }
    }

    /// Replace the student's recommendations with at most `limit` new ones.
    ///
    /// Returns the number persisted, which may be zero.
    pub async fn generate(&self, student_id: DbId, limit: i32) -> Result<usize, CoreError> {
        self.generate_at(student_id, limit, Utc::now()).await
    }

    /// [`generate`](Self::generate) with an explicit clock.
    pub async fn generate_at(
        &self,
        student_id: DbId,
        limit: i32,
        now: Timestamp,
    ) -> Result<usize, CoreError> {
        validate_limit(limit)?;

        let candidates = self.candidates(student_id, now).await;
        let total = candidates.len();
        let ranked = rank(candidates, limit as usize);

        let persisted = self.store.replace_for_student(student_id, &ranked).await?;

        tracing::info!(
            student_id,
            candidates = total,
            persisted,
            limit,
            "Recommendations generated"
        );
        Ok(persisted)
    }

    /// All candidates for the student in accumulation order, unranked.
    ///
    /// Falls back to cold start when no other strategy produced anything.
    pub async fn candidates(&self, student_id: DbId, now: Timestamp) -> Vec<Candidate> {
        let ctx = StrategyContext {
            catalog: self.catalog.as_ref(),
            progress: self.progress.as_ref(),
            student_id,
            now,
            recent_activity_days: self.config.recent_activity_window_days,
        };

        let mut candidates = Vec::new();
        candidates.extend(
            settle(
                student_id,
                Strategy::ContinueInProgress,
                strategies::continue_in_progress(&ctx),
            )
            .await,
        );
        candidates
            .extend(settle(student_id, Strategy::CourseGap, strategies::course_gaps(&ctx)).await);
        candidates
            .extend(settle(student_id, Strategy::NextLesson, strategies::next_lessons(&ctx)).await);
        candidates.extend(settle(student_id, Strategy::Review, strategies::reviews(&ctx)).await);
        candidates
            .extend(settle(student_id, Strategy::NewCourse, strategies::new_courses(&ctx)).await);

        if candidates.is_empty() {
            candidates = settle(student_id, Strategy::ColdStart, strategies::cold_start(&ctx)).await;
        }
        candidates
    }

    /// Non-dismissed recommendations, highest priority first.
    pub async fn active(&self, student_id: DbId) -> Result<Vec<ActiveRecommendation>, CoreError> {
        self.store.active_for_student(student_id).await
    }

    /// Dismiss one of the student's recommendations.
    pub async fn dismiss(&self, student_id: DbId, recommendation_id: DbId) -> Result<(), CoreError> {
        if !self.store.dismiss(student_id, recommendation_id).await? {
            return Err(CoreError::NotFound {
                entity: "Recommendation",
                id: recommendation_id,
            });
        }
        tracing::info!(student_id, recommendation_id, "Recommendation dismissed");
        Ok(())
    }
}

/// Await one strategy; a failure contributes nothing and is logged.
async fn settle(
    student_id: DbId,
    strategy: Strategy,
    run: impl Future<Output = Result<Vec<Candidate>, CoreError>>,
) -> Vec<Candidate> {
    match run.await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!(
                student_id,
                strategy = strategy.as_str(),
                error = %e,
                "Recommendation strategy failed, skipping"
            );
            Vec::new()
        }
    }
}
