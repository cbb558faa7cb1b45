pub mod activity;
pub mod courses;
pub mod health;
pub mod progress;
pub mod recommendations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /courses                            GET    list
/// /courses/{id}                       GET    get_by_id
/// /courses/{id}/lessons               GET    list_lessons
/// /recommendations/generate           POST   generate
/// /recommendations                    GET    list_active
/// /recommendations/{id}/dismiss       POST   dismiss
/// /progress                           GET    list, POST update
/// /progress/complete/{lesson_id}      POST   complete
/// /activity                           POST   log
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/courses", courses::router())
        .nest("/recommendations", recommendations::router())
        .nest("/progress", progress::router())
        .nest("/activity", activity::router())
}
