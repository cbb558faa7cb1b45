#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use learnpath_api::auth::jwt::{generate_access_token, JwtConfig};
use learnpath_api::config::ServerConfig;
use learnpath_api::router::build_app_router;
use learnpath_api::state::AppState;
use learnpath_core::types::DbId;
use learnpath_db::models::course::CreateCourse;
use learnpath_db::models::lesson::CreateLesson;
use learnpath_db::models::user::CreateUser;
use learnpath_db::repositories::{CourseRepo, LessonRepo, UserRepo};

/// Build a test `ServerConfig` with the development defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        recommendation_default_limit: 5,
        recent_activity_window_days: 7,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the production router over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config()))
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user with `role` and return its id and a bearer token.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> (DbId, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed");
    let token = generate_access_token(user.id, role, &test_config().jwt)
        .expect("token generation should succeed");
    (user.id, token)
}

/// Create a published course with `lessons` lessons; returns lesson ids in order.
pub async fn create_course(pool: &PgPool, title: &str, difficulty: &str, lessons: i32) -> Vec<DbId> {
    create_course_with_id(pool, title, difficulty, lessons).await.1
}

/// Like [`create_course`], also returning the course id.
pub async fn create_course_with_id(
    pool: &PgPool,
    title: &str,
    difficulty: &str,
    lessons: i32,
) -> (DbId, Vec<DbId>) {
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            title: title.to_string(),
            description: None,
            category: None,
            difficulty: difficulty.to_string(),
            estimated_hours: None,
            is_published: true,
        },
    )
    .await
    .expect("course creation should succeed");

    let mut ids = Vec::with_capacity(lessons as usize);
    for order in 1..=lessons {
        let lesson = LessonRepo::create(
            pool,
            &CreateLesson {
                course_id: course.id,
                title: format!("{title} lesson {order}"),
                description: None,
                content_type: None,
                order,
                estimated_minutes: 30,
            },
        )
        .await
        .expect("lesson creation should succeed");
        ids.push(lesson.id);
    }
    (course.id, ids)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST with a bearer token and no body or content type.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
