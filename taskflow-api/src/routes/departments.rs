/// Department endpoints
///
/// # Endpoints
///
/// - `GET /v1/departments` - List departments in the caller's scope
/// - `POST /v1/departments` - Create a department

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::resolve_context,
};
use axum::{extract::State, Extension, Json};
use taskflow_shared::{
    auth::{jwt::Claims, permissions::Capability},
    models::department::{CreateDepartment, Department},
};

/// Lists departments
pub async fn list_departments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<Department>>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewDepartments)?;

    let departments = Department::list(&state.db, ctx.scope()).await?;
    Ok(Json(departments))
}

/// Creates a department in the caller's organization
pub async fn create_department(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateDepartment>,
) -> ApiResult<Json<Department>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewDepartments)?;

    if req.name.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "Department name must not be empty".to_string(),
            details: None,
        });
    }

    let organization_id = ctx.require_org()?;
    let department = Department::create(&state.db, organization_id, req).await?;

    Ok(Json(department))
}
