use axum::routing::{get, post};
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/progress`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> update
/// POST   /complete/{lesson_id}   -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(progress::list).post(progress::update))
        .route("/complete/{lesson_id}", post(progress::complete))
}
