//! HTTP-level tests for the client lifecycle: feedback, approval, and the
//! waiting/feedback/approved status machine end to end.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_empty, post_json, post_json_auth};
use harmonia_db::models::project::CreateProject;
use harmonia_db::repositories::{FeedbackRepo, ProjectRepo};
use sqlx::PgPool;

async fn seed_project(pool: &PgPool, code: &str) -> harmonia_db::models::project::Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            preview_code: Some(code.to_string()),
            client_name: "Helena Duarte".to_string(),
            client_email: "helena@example.com".to_string(),
            package_type: "single".to_string(),
            briefing_id: None,
            order_id: None,
            expires_at: None,
        },
    )
    .await
    .expect("project creation should succeed")
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_feedback_moves_waiting_to_feedback(pool: PgPool) {
    let project = seed_project(&pool, "HAR-2025-010").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "content": "ajustar refrão" });
    let response = post_json(app, "/api/v1/preview/HAR-2025-010/feedback", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "feedback");
    assert_eq!(json["outcome"], "persisted");
    assert_eq!(json["data"]["feedback"][0]["content"], "ajustar refrão");

    // Exactly one history row, holding the literal text.
    let history = FeedbackRepo::list_for_project(&pool, project.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "ajustar refrão");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_feedback_rejected(pool: PgPool) {
    seed_project(&pool, "HAR-2025-011").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "content": "   " });
    let response = post_json(app, "/api/v1/preview/HAR-2025-011/feedback", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_feedback_after_approval_conflicts(pool: PgPool) {
    seed_project(&pool, "HAR-2025-012").await;
    let app = common::build_test_app(pool);

    let response = post_empty(app.clone(), "/api/v1/preview/HAR-2025-012/approve").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "content": "mais uma coisa" });
    let response = post_json(app, "/api/v1/preview/HAR-2025-012/feedback", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_is_idempotent(pool: PgPool) {
    let project = seed_project(&pool, "HAR-2025-013").await;
    let app = common::build_test_app(pool.clone());

    let response = post_empty(app.clone(), "/api/v1/preview/HAR-2025-013/approve").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");

    // A second approval reports the same state without new history.
    let response = post_empty(app, "/api/v1/preview/HAR-2025-013/approve").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");

    let history = FeedbackRepo::list_for_project(&pool, project.id).await.unwrap();
    assert!(history.is_empty(), "approvals never write history rows");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_new_version_returns_project_to_waiting(pool: PgPool) {
    let project = seed_project(&pool, "HAR-2025-014").await;
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(&pool, app.clone()).await;

    let body = serde_json::json!({ "content": "menos bateria" });
    let response = post_json(app.clone(), "/api/v1/preview/HAR-2025-014/feedback", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({
        "name": "Versão 2",
        "audio_url": "https://cdn.example.com/v2.mp3"
    });
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{}/versions", project.id),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "waiting");
    assert_eq!(json["data"]["versions"][0]["name"], "Versão 2");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_code_to_feedback_round_trip(pool: PgPool) {
    let project = seed_project(&pool, "HAR-2025-001").await;
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(&pool, app.clone()).await;

    // Attach one version.
    let body = serde_json::json!({
        "name": "Versão 1",
        "description": "primeira prévia",
        "audio_url": "https://cdn.example.com/v1.mp3"
    });
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{}/versions", project.id),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The client sees it on the preview page.
    let response = get(app.clone(), "/api/v1/preview/HAR-2025-001").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["versions"].as_array().unwrap().len(), 1);

    // Feedback lands and is visible through the admin list.
    let body = serde_json::json!({ "content": "ajustar refrão" });
    let response = post_json(app.clone(), "/api/v1/preview/HAR-2025-001/feedback", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/projects?q=helena", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let listed = &json["data"][0];
    assert_eq!(listed["id"], project.id);
    assert_eq!(listed["status"], "feedback");
}
