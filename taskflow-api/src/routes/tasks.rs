/// Task endpoints
///
/// The Kanban board reads and writes through here. Status changes are the
/// one privileged write: they go through a dedicated endpoint backed by the
/// single status-mutation chokepoint, which records a status event for
/// every change.
///
/// # Endpoints
///
/// - `GET /v1/tasks` - List tasks with optional filters
/// - `POST /v1/tasks` - Create a task (status starts at TODO)
/// - `GET /v1/tasks/:id` - Get one task
/// - `PATCH /v1/tasks/:id` - Update non-status fields
/// - `PUT /v1/tasks/:id/status` - Move a task between board columns
/// - `POST /v1/tasks/:id/comments` - Append a comment
/// - `GET /v1/tasks/:id/events` - Status change history

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
        status_event::StatusEvent,
        task::{Comment, CreateTask, Task, TaskFilter, TaskStatus, UpdateTask},
    },
};
use uuid::Uuid;

/// Status write request
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Target board column; an unknown value fails JSON parsing with 422
    pub status: TaskStatus,
}

/// Comment request
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

/// Lists tasks visible to the caller, with optional filters
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<Json<Vec<Task>>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewKanban)?;

    let tasks = Task::list(&state.db, ctx.scope(), filter).await?;
    Ok(Json(tasks))
}

/// Creates a task under a project
///
/// The task inherits the project's organization and starts at TODO.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateTask>,
) -> ApiResult<Json<Task>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::CreateTask)?;

    if req.title.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "Task title must not be empty".to_string(),
            details: None,
        });
    }

    let project = Project::find_by_id(&state.db, req.project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    ctx.check_same_org(project.organization_id)?;

    let task = Task::create(&state.db, project.organization_id, req).await?;

    tracing::info!(task_id = %task.id, project_id = %task.project_id, "task created");

    Ok(Json(task))
}

/// Gets one task
pub async fn get_task(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewKanban)?;

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    ctx.check_same_org(task.organization_id)?;

    Ok(Json(task))
}

/// Updates a task's non-status fields
///
/// Status is deliberately absent from the update payload; the only way to
/// change it is the status endpoint below.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::CreateTask)?;

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    ctx.check_same_org(task.organization_id)?;

    let updated = Task::update(&state.db, id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(updated))
}

/// Moves a task to another board column
///
/// Any column may be written from any other; adjacency is not validated.
/// The write appends a status event recording actor, from, to, and time.
pub async fn set_task_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> ApiResult<Json<Task>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::UpdateTaskStatus)?;

    let task = Task::set_status(&state.db, &ctx, id, req.status).await?;

    Ok(Json(task))
}

/// Appends a comment to a task
///
/// Any member who can see the board may comment; the comment records the
/// caller's display name.
pub async fn add_task_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> ApiResult<Json<Task>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewKanban)?;

    if req.text.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "Comment text must not be empty".to_string(),
            details: None,
        });
    }

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    ctx.check_same_org(task.organization_id)?;

    let comment = Comment::new(ctx.actor_name().to_string(), req.text);

    let updated = Task::add_comment(&state.db, id, &comment)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(updated))
}

/// Lists the caller's own tasks
///
/// The personal todo view: open to every role, including those that cannot
/// see the full board. Assignment is by display name.
pub async fn my_todo(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<Task>>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewTodo)?;

    let filter = TaskFilter {
        assigned_to: Some(ctx.actor_name().to_string()),
        ..Default::default()
    };

    let tasks = Task::list(&state.db, ctx.scope(), filter).await?;
    Ok(Json(tasks))
}

/// Lists the status change history for a task, oldest first
pub async fn list_task_events(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<StatusEvent>>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewKanban)?;

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    ctx.check_same_org(task.organization_id)?;

    let events = StatusEvent::list_by_task(&state.db, id).await?;
    Ok(Json(events))
}
