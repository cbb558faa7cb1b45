//! Handlers for generating, listing, and dismissing recommendations.
//!
//! All endpoints act on the calling student's own recommendations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use learnpath_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStudent;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// Falls back to `RECOMMENDATION_DEFAULT_LIMIT` when omitted.
    #[serde(default)]
    pub limit: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub count: usize,
}

/// POST /api/v1/recommendations/generate
///
/// Replace the caller's recommendations with a freshly ranked set. The body
/// is optional.
pub async fn generate(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    input: Option<Json<GenerateRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = input.map(|Json(body)| body).unwrap_or_default();
    let limit = input
        .limit
        .unwrap_or(state.config.recommendation_default_limit);

    let count = state.engine.generate(user.user_id, limit).await?;

    Ok(Json(DataResponse {
        data: GenerateResponse { count },
    }))
}

/// GET /api/v1/recommendations
pub async fn list_active(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let recommendations = state.engine.active(user.user_id).await?;
    Ok(Json(DataResponse {
        data: recommendations,
    }))
}

/// POST /api/v1/recommendations/{id}/dismiss
///
/// 404 when the id does not exist or belongs to another student.
pub async fn dismiss(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.engine.dismiss(user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
