/// Database-backed integration tests
///
/// These need a real PostgreSQL server. Each test skips itself when
/// DATABASE_URL is unset or the server is unreachable, and applies the
/// migrations before asserting anything, so the suite stays green on
/// machines without a database while still exercising the write paths
/// where one exists.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use taskflow_shared::auth::jwt::{create_token, Claims};
use taskflow_shared::db::bootstrap::ensure_super_admin;
use taskflow_shared::db::migrations::run_migrations;
use taskflow_shared::models::organization::{CreateOrganization, Organization, Theme};
use taskflow_shared::models::user::{CreateUser, Role, User};
use tower::ServiceExt as _;
use uuid::Uuid;

async fn try_connect() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .ok()?;
    run_migrations(&pool).await.ok()?;
    Some(pool)
}

/// Provisions a SuperAdmin row and returns a bearer header for it
///
/// Each caller passes a unique tag so parallel tests never race on the
/// same email.
async fn super_admin_header(pool: &PgPool, tag: &str) -> String {
    let root = ensure_super_admin(
        pool,
        &format!("root-{}@taskflow.test", tag),
        "bootstrap-password-123",
    )
    .await
    .expect("super admin");

    let claims = Claims::new(root.id, root.name, Role::SuperAdmin, None);
    let token = create_token(&claims, common::TEST_JWT_SECRET).expect("token");
    format!("Bearer {}", token)
}

#[tokio::test]
async fn test_organization_create_rolls_back_on_admin_email_conflict() {
    let Some(pool) = try_connect().await else {
        eprintln!("skipping: DATABASE_URL not set or unreachable");
        return;
    };

    let tag = Uuid::new_v4().simple().to_string();
    let auth = super_admin_header(&pool, &tag).await;
    let ctx = TestContext::with_pool(pool.clone());

    let existing = Organization::create(
        &pool,
        CreateOrganization {
            name: "Existing Org".to_string(),
            subdomain: format!("existing-{}", tag),
            logo: String::new(),
            theme: Theme::default(),
        },
    )
    .await
    .expect("organization");

    let taken_email = format!("taken-{}@example.com", tag);
    User::create(
        &pool,
        CreateUser {
            organization_id: Some(existing.id),
            name: "Existing Admin".to_string(),
            email: taken_email.clone(),
            password_hash: "irrelevant".to_string(),
            role: Role::Admin,
            avatar: String::new(),
        },
    )
    .await
    .expect("user");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/organizations")
        .header("authorization", &auth)
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "name": "Fresh Org",
                "subdomain": format!("fresh-{}", tag),
                "admin_name": "Fresh Admin",
                "admin_email": taken_email,
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "conflict");

    // The rejected provisioning must not leave an admin-less tenant behind
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM organizations WHERE subdomain = $1")
            .bind(format!("fresh-{}", tag))
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_organization_create_provisions_admin() {
    let Some(pool) = try_connect().await else {
        eprintln!("skipping: DATABASE_URL not set or unreachable");
        return;
    };

    let tag = Uuid::new_v4().simple().to_string();
    let auth = super_admin_header(&pool, &tag).await;
    let ctx = TestContext::with_pool(pool.clone());

    let admin_email = format!("admin-{}@example.com", tag);
    let request = Request::builder()
        .method("POST")
        .uri("/v1/organizations")
        .header("authorization", &auth)
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "name": "Acme Corp",
                "subdomain": format!("acme-{}", tag),
                "admin_name": "Acme Admin",
                "admin_email": admin_email,
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["admin"]["email"], admin_email.as_str());
    assert!(!body["admin"]["temp_password"].as_str().unwrap().is_empty());

    let admin = User::find_by_email(&pool, &admin_email)
        .await
        .unwrap()
        .expect("provisioned admin");
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(
        admin.organization_id.map(|id| id.to_string()),
        body["organization"]["id"].as_str().map(String::from)
    );
}

#[tokio::test]
async fn test_member_provisioning_into_unknown_organization_is_404() {
    let Some(pool) = try_connect().await else {
        eprintln!("skipping: DATABASE_URL not set or unreachable");
        return;
    };

    let tag = Uuid::new_v4().simple().to_string();
    let auth = super_admin_header(&pool, &tag).await;
    let ctx = TestContext::with_pool(pool.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/v1/team")
        .header("authorization", &auth)
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "name": "New Member",
                "email": format!("member-{}@example.com", tag),
                "role": "Developer",
                "organization_id": Uuid::new_v4(),
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "unknown_organization");
}
