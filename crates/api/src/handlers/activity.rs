//! Handler for appending to the activity log.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_core::learning::{validate_minutes, ActivityEventType};
use learnpath_db::models::activity::CreateActivity;
use learnpath_db::repositories::{ActivityRepo, LessonRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/activity
///
/// Lesson events must name an existing lesson; session events must not name
/// one.
pub async fn log(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateActivity>,
) -> AppResult<impl IntoResponse> {
    let event_type = ActivityEventType::from_str(&input.event_type)?;
    let duration = input.duration_minutes.unwrap_or(0);
    validate_minutes(duration, "duration_minutes")?;

    match (event_type.requires_lesson(), input.lesson_id) {
        (true, None) => {
            return Err(CoreError::Validation(format!(
                "{} events require a lesson_id",
                event_type.as_str()
            ))
            .into());
        }
        (false, Some(_)) => {
            return Err(CoreError::Validation(format!(
                "{} events must not reference a lesson",
                event_type.as_str()
            ))
            .into());
        }
        (true, Some(lesson_id)) => {
            LessonRepo::find_by_id(&state.pool, lesson_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Lesson",
                    id: lesson_id,
                })?;
        }
        (false, None) => {}
    }

    let activity = ActivityRepo::log(
        &state.pool,
        user.user_id,
        event_type.as_str(),
        input.lesson_id,
        duration,
    )
    .await?;

    tracing::debug!(
        student_id = user.user_id,
        event_type = event_type.as_str(),
        lesson_id = ?input.lesson_id,
        "Activity logged",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: activity })))
}
