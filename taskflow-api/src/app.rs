/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskflow_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskflow_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskflow_shared::auth::jwt;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the secret used for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// └── /v1/                             # API v1 (versioned)
///     ├── POST /auth/login             # Login (public)
///     ├── /organizations               # SuperAdmin administration
///     ├── /projects                    # Projects
///     ├── /stories                     # Stories (BRD/PRD)
///     ├── /tasks                       # Tasks, status writes, comments
///     ├── /todo                        # The caller's own tasks
///     ├── /team                        # Organization members
///     ├── /departments                 # Departments
///     └── /dashboard                   # stats / weekly / performance
/// ```
///
/// Everything under `/v1` except `/v1/auth/login` requires a Bearer token.
/// The middleware only validates the token and parks the claims in request
/// extensions; handlers resolve claims into a full request context and run
/// their own capability checks.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new().route("/login", post(routes::auth::login));

    // Everything below requires a valid token
    let protected_routes = Router::new()
        .route(
            "/organizations",
            get(routes::organizations::list_organizations)
                .post(routes::organizations::create_organization),
        )
        .route(
            "/organizations/:id",
            get(routes::organizations::get_organization)
                .patch(routes::organizations::update_organization),
        )
        .route(
            "/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route("/projects/:id", get(routes::projects::get_project))
        .route(
            "/stories",
            get(routes::stories::list_stories).post(routes::stories::create_story),
        )
        .route(
            "/stories/:id",
            get(routes::stories::get_story).patch(routes::stories::update_story),
        )
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task).patch(routes::tasks::update_task),
        )
        .route("/tasks/:id/status", put(routes::tasks::set_task_status))
        .route("/tasks/:id/comments", post(routes::tasks::add_task_comment))
        .route("/tasks/:id/events", get(routes::tasks::list_task_events))
        .route("/todo", get(routes::tasks::my_todo))
        .route(
            "/team",
            get(routes::team::list_team).post(routes::team::create_member),
        )
        .route(
            "/departments",
            get(routes::departments::list_departments)
                .post(routes::departments::create_department),
        )
        .route("/dashboard/stats", get(routes::dashboard::stats))
        .route("/dashboard/weekly", get(routes::dashboard::weekly))
        .route("/dashboard/performance", get(routes::dashboard::performance))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let v1_routes = Router::new().nest("/auth", auth_routes).merge(protected_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Token authentication middleware layer
///
/// Extracts and validates the Bearer token from the Authorization header,
/// then injects the validated claims into request extensions. Identity is
/// never read from any other header.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthenticated("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        crate::error::ApiError::BadRequest("Expected Bearer token".to_string())
    })?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
