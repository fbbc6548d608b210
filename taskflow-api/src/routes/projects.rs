/// Project endpoints
///
/// # Endpoints
///
/// - `GET /v1/projects` - List projects in the caller's scope
/// - `POST /v1/projects` - Create a project
/// - `GET /v1/projects/:id` - Get one project

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::resolve_context,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use taskflow_shared::{
    auth::{jwt::Claims, permissions::Capability},
    models::{
        organization::Organization,
        project::{CreateProject, Project},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Target organization; only meaningful for SuperAdmin, who has no
    /// organization of their own. Members always create in their own scope.
    pub organization_id: Option<Uuid>,
}

/// Lists projects visible to the caller
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<Project>>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewProjects)?;

    let projects = Project::list(&state.db, ctx.scope()).await?;
    Ok(Json(projects))
}

/// Creates a project
pub async fn create_project(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<Project>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::CreateProject)?;
    req.validate()?;

    let organization_id = match req.organization_id {
        Some(id) => {
            ctx.check_same_org(id)?;
            if Organization::find_by_id(&state.db, id).await?.is_none() {
                return Err(ApiError::UnknownOrganization(format!(
                    "Unknown organization: {}",
                    id
                )));
            }
            id
        }
        None => ctx.require_org()?,
    };

    let project = Project::create(
        &state.db,
        organization_id,
        CreateProject {
            name: req.name,
            description: req.description,
        },
    )
    .await?;

    Ok(Json(project))
}

/// Gets one project
pub async fn get_project(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewProjects)?;

    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    ctx.check_same_org(project.organization_id)?;

    Ok(Json(project))
}
