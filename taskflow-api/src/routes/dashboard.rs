/// Dashboard and reporting endpoints
///
/// All three views are recomputed on every call over the caller's
/// organization scope; SuperAdmin gets the unscoped global view.
///
/// # Endpoints
///
/// - `GET /v1/dashboard/stats` - Entity totals and task breakdowns
/// - `GET /v1/dashboard/weekly` - Per-team weekly summary
/// - `GET /v1/dashboard/performance` - Per-member completion stats

use crate::{app::AppState, error::ApiResult, routes::resolve_context};
use axum::{extract::State, Extension, Json};
use taskflow_shared::{
    auth::{jwt::Claims, permissions::Capability},
    reports,
};

/// Dashboard statistics
pub async fn stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<reports::dashboard::DashboardStats>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewDashboard)?;

    let stats = reports::dashboard::dashboard_stats(&state.db, ctx.scope()).await?;
    Ok(Json(stats))
}

/// Weekly summary grouped by team
pub async fn weekly(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<reports::weekly::WeeklySummary>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewWeekly)?;

    let summary = reports::weekly::weekly_summary(&state.db, ctx.scope()).await?;
    Ok(Json(summary))
}

/// Per-member performance report
pub async fn performance(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<reports::performance::MemberPerformance>>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewPerformance)?;

    let report = reports::performance::member_performance(&state.db, ctx.scope()).await?;
    Ok(Json(report))
}
