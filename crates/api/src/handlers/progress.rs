//! Handlers for a student's per-lesson progress.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_core::learning::{validate_minutes, ProgressStatus};
use learnpath_core::types::DbId;
use learnpath_db::models::progress::UpdateProgress;
use learnpath_db::repositories::{LessonRepo, ProgressRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStudent;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub lesson_id: DbId,
    pub status: Option<String>,
    /// Minutes to add to the running total.
    pub time_spent: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteLessonRequest {
    #[serde(default)]
    pub time_spent: Option<i32>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_lesson_exists(state: &AppState, lesson_id: DbId) -> AppResult<()> {
    LessonRepo::find_by_id(&state.pool, lesson_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Lesson",
            id: lesson_id,
        })?;
    Ok(())
}

fn validate_update(input: &UpdateProgress) -> Result<(), CoreError> {
    if let Some(status) = &input.status {
        ProgressStatus::from_str(status)?;
    }
    if let Some(minutes) = input.time_spent {
        validate_minutes(minutes, "time_spent")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/progress
pub async fn list(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let progress = ProgressRepo::list_for_student(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: progress }))
}

/// POST /api/v1/progress
///
/// Create or update the caller's progress on one lesson.
pub async fn update(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Json(input): Json<UpdateProgressRequest>,
) -> AppResult<impl IntoResponse> {
    let update = UpdateProgress {
        status: input.status,
        time_spent: input.time_spent,
        notes: input.notes,
    };
    validate_update(&update)?;
    ensure_lesson_exists(&state, input.lesson_id).await?;

    let progress =
        ProgressRepo::apply_update(&state.pool, user.user_id, input.lesson_id, &update).await?;

    tracing::info!(
        student_id = user.user_id,
        lesson_id = input.lesson_id,
        status = %progress.status,
        time_spent_minutes = progress.time_spent_minutes,
        "Progress updated",
    );

    Ok(Json(DataResponse { data: progress }))
}

/// POST /api/v1/progress/complete/{lesson_id}
///
/// The body is optional; without one no time is added.
pub async fn complete(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Path(lesson_id): Path<DbId>,
    input: Option<Json<CompleteLessonRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = input.map(|Json(body)| body).unwrap_or_default();
    let update = UpdateProgress {
        status: Some(ProgressStatus::Completed.as_str().to_string()),
        time_spent: Some(input.time_spent.unwrap_or(0)),
        notes: None,
    };
    validate_update(&update)?;
    ensure_lesson_exists(&state, lesson_id).await?;

    let progress = ProgressRepo::apply_update(&state.pool, user.user_id, lesson_id, &update).await?;

    tracing::info!(student_id = user.user_id, lesson_id, "Lesson completed");

    Ok(Json(DataResponse { data: progress }))
}
