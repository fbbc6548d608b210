/// Health endpoint for load balancers and uptime monitors
///
/// `GET /health` is the one route outside the token middleware. It never
/// fails: an unreachable database downgrades the report instead of erroring,
/// so a monitor can tell "process up, store down" apart from "process down".
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "taskflow-api",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health report
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the database answers, "degraded" otherwise
    pub status: &'static str,

    /// Service identifier
    pub service: &'static str,

    /// Running version
    pub version: &'static str,

    /// "connected" or "disconnected"
    pub database: &'static str,
}

/// Reports liveness plus database reachability
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = sqlx::query("SELECT 1").fetch_one(&state.db).await.is_ok();

    Json(HealthResponse {
        status: if database_up { "healthy" } else { "degraded" },
        service: "taskflow-api",
        version: taskflow_shared::VERSION,
        database: if database_up {
            "connected"
        } else {
            "disconnected"
        },
    })
}
