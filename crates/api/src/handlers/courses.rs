//! Read-only course catalog handlers.
//!
//! Any authenticated caller may browse; progress fields always describe the
//! caller's own progress and are zero for users who never studied.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_core::learning::{course_progress_percent, course_status};
use learnpath_core::types::{DbId, Timestamp};
use learnpath_db::models::course::{Course, CourseProgressRow};
use learnpath_db::models::lesson::Lesson;
use learnpath_db::repositories::{CourseRepo, LessonRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A published course with the caller's standing in it.
#[derive(Debug, Serialize)]
pub struct CourseWithProgress {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub estimated_hours: i32,
    pub total_lessons: i32,
    pub completed_lessons: i32,
    pub progress_percentage: f64,
    pub time_spent_minutes: i32,
    pub status: &'static str,
}

impl From<CourseProgressRow> for CourseWithProgress {
    fn from(row: CourseProgressRow) -> Self {
        Self {
            progress_percentage: course_progress_percent(row.completed_lessons, row.total_lessons),
            status: course_status(row.completed_lessons, row.total_lessons).as_str(),
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            difficulty: row.difficulty,
            estimated_hours: row.estimated_hours,
            total_lessons: row.total_lessons,
            completed_lessons: row.completed_lessons,
            time_spent_minutes: row.time_spent_minutes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseDetail {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub estimated_hours: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub total_lessons: usize,
    pub lessons: Vec<Lesson>,
}

impl CourseDetail {
    fn new(course: Course, lessons: Vec<Lesson>) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            category: course.category,
            difficulty: course.difficulty,
            estimated_hours: course.estimated_hours,
            is_published: course.is_published,
            created_at: course.created_at,
            total_lessons: lessons.len(),
            lessons,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_course(state: &AppState, course_id: DbId) -> AppResult<Course> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        })?;
    Ok(course)
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/courses
pub async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let courses: Vec<CourseWithProgress> =
        CourseRepo::list_with_student_progress(&state.pool, user.user_id)
            .await?
            .into_iter()
            .map(CourseWithProgress::from)
            .collect();
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/courses/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course = find_course(&state, id).await?;
    let lessons = LessonRepo::list_for_course(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: CourseDetail::new(course, lessons),
    }))
}

/// GET /api/v1/courses/{id}/lessons
///
/// Lessons in order, each with the caller's progress.
pub async fn list_lessons(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_course(&state, id).await?;
    let lessons = LessonRepo::list_with_student_progress(&state.pool, id, user.user_id).await?;
    Ok(Json(DataResponse { data: lessons }))
}
