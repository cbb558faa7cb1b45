//! HTTP-level tests for the read-only course catalog.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_course, create_course_with_id, create_user, get, get_auth, post_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_list_requires_a_token(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/courses").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_list_is_title_ordered_with_caller_progress(pool: PgPool) {
    let (_, token) = create_user(&pool, "list@example.com", "student").await;
    let zeta = create_course(&pool, "Zeta", "advanced", 3).await;
    create_course(&pool, "Alpha", "beginner", 2).await;

    for (lesson_id, status, minutes) in [(zeta[0], "completed", 20), (zeta[1], "in_progress", 5)] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/progress",
            json!({ "lesson_id": lesson_id, "status": status, "time_spent": minutes }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(common::build_test_app(pool), "/api/v1/courses", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["title"], "Alpha");
    assert_eq!(data[0]["total_lessons"], 2);
    assert_eq!(data[0]["completed_lessons"], 0);
    assert_eq!(data[0]["status"], "not_started");

    assert_eq!(data[1]["title"], "Zeta");
    assert_eq!(data[1]["total_lessons"], 3);
    assert_eq!(data[1]["completed_lessons"], 1);
    assert_eq!(data[1]["progress_percentage"], 33.33);
    assert_eq!(data[1]["time_spent_minutes"], 25);
    assert_eq!(data[1]["status"], "in_progress");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_list_hides_other_students_progress(pool: PgPool) {
    let (_, owner) = create_user(&pool, "owner@example.com", "student").await;
    let (_, other) = create_user(&pool, "other@example.com", "student").await;
    let lessons = create_course(&pool, "Solo", "beginner", 1).await;

    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/progress/complete/{}", lessons[0]),
        json!({}),
        &owner,
    )
    .await;

    let json = body_json(get_auth(common::build_test_app(pool), "/api/v1/courses", &other).await).await;
    assert_eq!(json["data"][0]["completed_lessons"], 0);
    assert_eq!(json["data"][0]["status"], "not_started");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_detail_lists_lessons_in_order(pool: PgPool) {
    let (_, token) = create_user(&pool, "mentor@example.com", "mentor").await;
    let (course_id, lessons) = create_course_with_id(&pool, "Databases", "intermediate", 3).await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Databases");
    assert_eq!(json["data"]["total_lessons"], 3);
    let ids: Vec<i64> = json["data"]["lessons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, lessons);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_course_returns_404(pool: PgPool) {
    let (_, token) = create_user(&pool, "missing@example.com", "student").await;

    for uri in ["/api/v1/courses/999999", "/api/v1/courses/999999/lessons"] {
        let response = get_auth(common::build_test_app(pool.clone()), uri, &token).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Course with id 999999 not found");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_lessons_carry_caller_status(pool: PgPool) {
    let (_, token) = create_user(&pool, "lessons@example.com", "student").await;
    let (course_id, lessons) = create_course_with_id(&pool, "Networks", "beginner", 2).await;

    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/progress",
        json!({ "lesson_id": lessons[0], "time_spent": 12, "notes": "tcp handshake" }),
        &token,
    )
    .await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{course_id}/lessons"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    assert_eq!(data[0]["id"], lessons[0]);
    assert_eq!(data[0]["status"], "in_progress");
    assert_eq!(data[0]["time_spent_minutes"], 12);
    assert_eq!(data[0]["notes"], "tcp handshake");
    assert!(data[0]["last_accessed"].is_string());

    assert_eq!(data[1]["order"], 2);
    assert_eq!(data[1]["status"], "not_started");
    assert_eq!(data[1]["time_spent_minutes"], 0);
    assert!(data[1]["last_accessed"].is_null());
    assert!(data[1]["completed_at"].is_null());
}
