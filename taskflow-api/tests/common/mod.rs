/// Common test utilities for integration tests
///
/// Builds the full router over a lazy connection pool, so middleware and
/// routing behavior can be exercised without a running database. Tests that
/// need real rows connect eagerly and run migrations first.

use sqlx::postgres::PgPoolOptions;
use taskflow_api::app::{build_router, AppState};
use taskflow_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskflow_shared::auth::jwt::{create_token, Claims};
use taskflow_shared::models::user::Role;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

const TEST_DATABASE_URL: &str = "postgresql://localhost/taskflow_test";

/// Test context holding the app under test
pub struct TestContext {
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Builds the app over a lazy pool; no database connection is made
    /// until a handler actually runs a query.
    pub fn new() -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_lazy(TEST_DATABASE_URL)
            .expect("lazy pool");

        Self::with_pool(pool)
    }

    /// Builds the app over a caller-supplied pool, for tests that run
    /// against a real database.
    pub fn with_pool(pool: sqlx::PgPool) -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: TEST_DATABASE_URL.to_string(),
                max_connections: 2,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
            bootstrap: None,
        };

        let state = AppState::new(pool, config.clone());
        let app = build_router(state);

        TestContext { app, config }
    }

    /// Issues a valid token for a synthetic user
    pub fn token(&self, role: Role, org_id: Option<Uuid>) -> String {
        let claims = Claims::new(Uuid::new_v4(), "Test User".to_string(), role, org_id);
        create_token(&claims, &self.config.jwt.secret).expect("token")
    }

    /// Returns authorization header value
    pub fn auth_header(&self, role: Role, org_id: Option<Uuid>) -> String {
        format!("Bearer {}", self.token(role, org_id))
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}
