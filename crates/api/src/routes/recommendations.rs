//! Routes for the calling student's recommendations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recommendations;
use crate::state::AppState;

/// Routes mounted at `/recommendations`.
///
/// ```text
/// GET    /                 -> list_active
/// POST   /generate         -> generate
/// POST   /{id}/dismiss     -> dismiss
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recommendations::list_active))
        .route("/generate", post(recommendations::generate))
        .route("/{id}/dismiss", post(recommendations::dismiss))
}
