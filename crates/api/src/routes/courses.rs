use axum::routing::get;
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                -> list
/// GET    /{id}            -> get_by_id
/// GET    /{id}/lessons    -> list_lessons
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list))
        .route("/{id}", get(courses::get_by_id))
        .route("/{id}/lessons", get(courses::list_lessons))
}
