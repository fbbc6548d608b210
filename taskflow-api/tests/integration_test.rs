/// Integration tests for the TaskFlow API
///
/// These exercise routing, the token middleware, and the error envelope
/// end-to-end through the real router. They run against a lazy pool, so no
/// database is required: every assertion here is about behavior that must
/// be decided before any query runs.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use serde_json::json;
use taskflow_shared::auth::jwt::{create_token, Claims};
use taskflow_shared::models::user::Role;
use tower::ServiceExt as _;
use uuid::Uuid;

#[tokio::test]
async fn test_health_is_public() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    // No database behind the lazy pool, so the check reports degraded
    assert_eq!(body["service"], "taskflow-api");
    assert_eq!(body["database"], "disconnected");
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["version"], taskflow_shared::VERSION);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/tasks")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn test_all_protected_sections_reject_missing_token() {
    let ctx = TestContext::new();

    for uri in [
        "/v1/organizations",
        "/v1/projects",
        "/v1/stories",
        "/v1/tasks",
        "/v1/todo",
        "/v1/team",
        "/v1/departments",
        "/v1/dashboard/stats",
        "/v1/dashboard/weekly",
        "/v1/dashboard/performance",
    ] {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = ctx.app.clone().oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "expected 401 for {}",
            uri
        );
    }
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/tasks")
        .header("authorization", "Bearer not-a-real-token")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn test_token_signed_with_wrong_secret_is_rejected() {
    let ctx = TestContext::new();

    let claims = Claims::new(
        Uuid::new_v4(),
        "Forger".to_string(),
        Role::SuperAdmin,
        None,
    );
    let forged = create_token(&claims, "some-other-secret-also-32-bytes-long!").unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/organizations")
        .header("authorization", format!("Bearer {}", forged))
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_authorization_is_bad_request() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/tasks")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_status_write_rejects_unknown_status_value() {
    let ctx = TestContext::new();
    let org_id = Uuid::new_v4();

    // Body parsing happens before any query, so this fails fast even with
    // a valid token and no database.
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/v1/tasks/{}/status", Uuid::new_v4()))
        .header("authorization", ctx.auth_header(Role::Developer, Some(org_id)))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "status": "BLOCKED" }).to_string()))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_route_exists_and_validates_email() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": "not-an-email", "password": "x" }).to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "email");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/nonexistent")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
