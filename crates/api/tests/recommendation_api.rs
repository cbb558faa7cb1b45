//! HTTP-level tests for recommendation generation, listing, and dismissal.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_course, create_user, get, get_auth, post_auth, post_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn endpoints_require_a_token(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/recommendations").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mentors_are_forbidden(pool: PgPool) {
    let (_, token) = create_user(&pool, "mentor@example.com", "mentor").await;

    let response = get_auth(common::build_test_app(pool), "/api/v1/recommendations", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_then_list_cold_start(pool: PgPool) {
    let (_, token) = create_user(&pool, "new@example.com", "student").await;
    create_course(&pool, "Python Basics", "beginner", 3).await;
    create_course(&pool, "Systems", "advanced", 3).await;
    create_course(&pool, "HTML Basics", "beginner", 3).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/recommendations/generate",
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["count"], 2);

    let response = get_auth(common::build_test_app(pool), "/api/v1/recommendations", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["priority"], 85);
    assert_eq!(data[0]["course_title"], "Python Basics");
    assert_eq!(data[0]["lesson_title"], "Python Basics lesson 1");
    assert_eq!(data[0]["reason"], "Start your learning journey with Python Basics");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_accepts_missing_body(pool: PgPool) {
    let (_, token) = create_user(&pool, "nobody@example.com", "student").await;
    for title in ["A", "B", "C", "D", "E", "F"] {
        create_course(&pool, title, "intermediate", 1).await;
    }

    let response = post_auth(
        common::build_test_app(pool),
        "/api/v1/recommendations/generate",
        &token,
    )
    .await;

    // Cold start falls back to three courses of any difficulty.
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["count"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_honours_explicit_limit(pool: PgPool) {
    let (_, token) = create_user(&pool, "lim@example.com", "student").await;
    for title in ["A", "B", "C"] {
        create_course(&pool, title, "beginner", 1).await;
    }

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/recommendations/generate",
        json!({ "limit": 1 }),
        &token,
    )
    .await;

    assert_eq!(body_json(response).await["data"]["count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_rejects_limit_out_of_range(pool: PgPool) {
    let (_, token) = create_user(&pool, "bad@example.com", "student").await;

    for limit in [0, 51] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/recommendations/generate",
            json!({ "limit": limit }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dismiss_hides_and_foreign_dismiss_is_404(pool: PgPool) {
    let (_, owner) = create_user(&pool, "owner@example.com", "student").await;
    let (_, other) = create_user(&pool, "other@example.com", "student").await;
    create_course(&pool, "Intro", "beginner", 2).await;

    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/recommendations/generate",
        json!({}),
        &owner,
    )
    .await;
    let json = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/v1/recommendations", &owner).await,
    )
    .await;
    let id = json["data"][0]["id"].as_i64().unwrap();
    let dismiss_uri = format!("/api/v1/recommendations/{id}/dismiss");

    let response =
        post_json_auth(common::build_test_app(pool.clone()), &dismiss_uri, json!({}), &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response =
        post_json_auth(common::build_test_app(pool.clone()), &dismiss_uri, json!({}), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(
        get_auth(common::build_test_app(pool), "/api/v1/recommendations", &owner).await,
    )
    .await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
