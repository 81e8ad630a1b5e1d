//! HTTP-level tests for the admin surface: access control, CRUD, version
//! pointers, briefing conversion, payments, and webhook configuration.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json, post_json_auth, put_empty_auth,
    put_json_auth,
};
use harmonia_core::notify::NotificationPurpose;
use harmonia_db::repositories::WebhookRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_routes_require_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(app, "/api/v1/clients").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_admin_role_is_forbidden(pool: PgPool) {
    common::create_user(&pool, "viewer", "viewer").await;
    let app = common::build_test_app(pool);
    let token = common::login(app.clone(), "viewer").await;

    let response = get_auth(app, "/api/v1/projects", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Clients CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_client_crud_over_http(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(&pool, app.clone()).await;

    let body = serde_json::json!({ "name": "Helena Duarte", "email": "helena@example.com" });
    let response = post_json_auth(app.clone(), "/api/v1/clients", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({ "phone": "+55 11 99999-0000" });
    let response = put_json_auth(app.clone(), &format!("/api/v1/clients/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["phone"], "+55 11 99999-0000");
    assert_eq!(json["data"]["name"], "Helena Duarte");

    let response = delete_auth(app.clone(), &format!("/api/v1/clients/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/clients/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Projects and version pointers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_create_generates_code_and_share_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(&pool, app.clone()).await;

    let body = serde_json::json!({
        "client_name": "Marcos Lima",
        "client_email": "marcos@studio.com",
        "package_type": "ep"
    });
    let response = post_json_auth(app, "/api/v1/projects", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let code = json["data"]["preview_code"].as_str().unwrap();
    assert!(code.starts_with("HAR-"), "generated code: {code}");
    assert!(json["data"]["share_token"].is_string());
    assert_eq!(json["data"]["status"], "waiting");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_repointing_recommended_replaces_previous(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(&pool, app.clone()).await;

    let body = serde_json::json!({
        "client_name": "Helena Duarte",
        "client_email": "helena@example.com",
        "package_type": "single"
    });
    let response = post_json_auth(app.clone(), "/api/v1/projects", body, &token).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let mut version_ids = Vec::new();
    for name in ["Versão 1", "Versão 2"] {
        let body = serde_json::json!({
            "name": name,
            "audio_url": format!("https://cdn.example.com/{name}.mp3")
        });
        let response = post_json_auth(
            app.clone(),
            &format!("/api/v1/projects/{id}/versions"),
            body,
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let versions = json["data"]["versions"].as_array().unwrap();
        version_ids.push(versions.last().unwrap()["id"].as_i64().unwrap());
    }

    for vid in &version_ids {
        let response = put_empty_auth(
            app.clone(),
            &format!("/api/v1/projects/{id}/versions/{vid}/recommend"),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Only the last-pointed version is recommended.
    let response = get_auth(app, &format!("/api/v1/projects/{id}"), &token).await;
    let json = body_json(response).await;
    let versions = json["data"]["versions"].as_array().unwrap();
    let recommended: Vec<_> = versions
        .iter()
        .filter(|v| v["recommended"] == true)
        .collect();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0]["id"].as_i64().unwrap(), version_ids[1]);
}

// ---------------------------------------------------------------------------
// Briefings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_briefing_submission_is_public(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "client_name": "Helena Duarte",
        "client_email": "helena@example.com",
        "package_type": "single",
        "message": "música para casamento"
    });
    let response = post_json(app, "/api/v1/briefings", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "new");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_briefing_convert_once(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(&pool, app.clone()).await;

    let body = serde_json::json!({
        "client_name": "Helena Duarte",
        "client_email": "helena@example.com",
        "package_type": "single",
        "message": "música para casamento"
    });
    let response = post_json(app.clone(), "/api/v1/briefings", body).await;
    let briefing_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/briefings/{briefing_id}/convert");
    let response = post_json_auth(app.clone(), &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["briefing"]["status"], "converted");
    assert_eq!(json["data"]["project"]["briefing_id"], briefing_id);
    assert!(json["data"]["project"]["preview_code"].is_string());

    // Converting twice is rejected, before any project write.
    let response = post_json_auth(app.clone(), &uri, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The rejected attempt created nothing: one briefing, one project.
    let response = get_auth(app, "/api/v1/projects", &token).await;
    let json = body_json(response).await;
    let projects = json["data"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["briefing_id"], briefing_id);
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_checkout_then_confirm_creates_project(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "client_name": "Marcos Lima",
        "client_email": "marcos@studio.com",
        "package_type": "single",
        "amount_cents": 120000
    });
    let response = post_json(app.clone(), "/api/v1/payments/checkout", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let order_id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["status"], "pending");
    assert!(json["data"]["checkout_url"]
        .as_str()
        .unwrap()
        .starts_with("https://pay.example.com/checkout/"));

    let uri = format!("/api/v1/payments/{order_id}/confirm");
    let response = post_json(app.clone(), &uri, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["order"]["status"], "paid");
    assert_eq!(json["data"]["project"]["order_id"], order_id);
    assert!(json["data"]["project"]["share_token"].is_string());

    // A replayed redirect cannot create a second project.
    let response = post_json(app, &uri, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_invoice_number_is_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(&pool, app.clone()).await;

    let body = serde_json::json!({ "number": "INV-2025-0001", "amount_cents": 50000 });
    let response = post_json_auth(app.clone(), "/api/v1/invoices", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/invoices", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Webhook configuration and queueing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_configure_endpoint_and_queue_on_feedback(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(&pool, app.clone()).await;

    let body = serde_json::json!({ "url": "https://hooks.example.com/feedback" });
    let response = put_json_auth(app.clone(), "/api/v1/webhooks/feedback", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let endpoint_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // A client feedback submission queues one delivery.
    let body = serde_json::json!({
        "client_name": "Helena Duarte",
        "client_email": "helena@example.com",
        "package_type": "single",
        "preview_code": "HAR-2025-020"
    });
    let response = post_json_auth(app.clone(), "/api/v1/projects", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "content": "ajustar refrão" });
    let response = post_json(app.clone(), "/api/v1/preview/HAR-2025-020/feedback", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let deliveries = WebhookRepo::list_deliveries_for_endpoint(&pool, endpoint_id, 10, 0)
        .await
        .unwrap();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].status, "pending");
    assert_eq!(deliveries[0].payload["event"], "feedback_submitted");

    // Configuration is visible through the listing.
    let response = get_auth(app.clone(), "/api/v1/webhooks", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Unknown purposes are rejected.
    let body = serde_json::json!({ "url": "https://hooks.example.com/x" });
    let response = put_json_auth(app, "/api/v1/webhooks/smoke_signal", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // No enabled endpoint for other purposes means nothing else was queued.
    assert!(WebhookRepo::find_enabled_endpoint(&pool, NotificationPurpose::Chatbot)
        .await
        .unwrap()
        .is_none());
}
