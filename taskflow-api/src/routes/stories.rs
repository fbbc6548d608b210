/// Story endpoints
///
/// Stories carry the requirement documents (BRD and PRD) and group tasks
/// under a project.
///
/// # Endpoints
///
/// - `GET /v1/stories?project_id=` - List stories, optionally per project
/// - `POST /v1/stories` - Create a story
/// - `GET /v1/stories/:id` - Get one story
/// - `PATCH /v1/stories/:id` - Update title, docs, or priority

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::resolve_context,
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use taskflow_shared::{
    auth::{jwt::Claims, permissions::Capability},
    models::{
        project::Project,
        story::{CreateStory, Story, UpdateStory},
    },
};
use uuid::Uuid;

/// Query parameters for listing stories
#[derive(Debug, Deserialize)]
pub struct StoryListQuery {
    pub project_id: Option<Uuid>,
}

/// Lists stories visible to the caller
pub async fn list_stories(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<StoryListQuery>,
) -> ApiResult<Json<Vec<Story>>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewProjects)?;

    let stories = Story::list(&state.db, ctx.scope(), query.project_id).await?;
    Ok(Json(stories))
}

/// Creates a story under a project
///
/// The story inherits the project's organization; a project outside the
/// caller's organization is rejected.
pub async fn create_story(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateStory>,
) -> ApiResult<Json<Story>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::CreateStory)?;

    if req.title.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "Story title must not be empty".to_string(),
            details: None,
        });
    }

    let project = Project::find_by_id(&state.db, req.project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    ctx.check_same_org(project.organization_id)?;

    let story = Story::create(&state.db, project.organization_id, req).await?;
    Ok(Json(story))
}

/// Gets one story
pub async fn get_story(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Story>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewProjects)?;

    let story = Story::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Story not found".to_string()))?;

    ctx.check_same_org(story.organization_id)?;

    Ok(Json(story))
}

/// Updates a story's title, description, docs, or priority
pub async fn update_story(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStory>,
) -> ApiResult<Json<Story>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::CreateStory)?;

    if req.is_empty() {
        return Err(ApiError::Validation {
            message: "Update must set at least one field".to_string(),
            details: None,
        });
    }

    let story = Story::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Story not found".to_string()))?;

    ctx.check_same_org(story.organization_id)?;

    let updated = Story::update(&state.db, id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound("Story not found".to_string()))?;

    Ok(Json(updated))
}
