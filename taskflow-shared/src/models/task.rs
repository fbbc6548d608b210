/// Task model and database operations
///
/// Tasks are the atomic unit of work: they carry status, priority, type,
/// team, an optional assignee (by member name), planning dates, and story
/// points.
///
/// # Status Machine
///
/// ```text
/// TODO → IN_PROGRESS → IN_REVIEW → DONE
/// ```
///
/// The ordering above is the nominal flow, but any status may be assigned
/// from any other (a Kanban drag writes the target column directly). The
/// machine deliberately does not validate adjacency; who may write a status
/// at all is decided by the permission evaluator. All status writes go
/// through [`Task::set_status`], which also appends a
/// [`StatusEvent`](super::status_event::StatusEvent) recording actor,
/// from-state, to-state, and timestamp. Concurrent writes to the same task
/// are last-write-wins.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('TODO', 'IN_PROGRESS', 'IN_REVIEW', 'DONE');
/// CREATE TYPE task_type AS ENUM ('Task', 'Bug', 'HotFix');
/// CREATE TYPE task_team AS ENUM ('Frontend', 'Backend', 'QA', 'Product', 'Business', 'Ops');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     story_id UUID REFERENCES stories(id) ON DELETE SET NULL,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     assigned_to VARCHAR(255),
///     start_date VARCHAR(32),
///     end_date VARCHAR(32),
///     target_date VARCHAR(32),
///     story_points INTEGER,
///     priority priority NOT NULL DEFAULT 'Medium',
///     task_type task_type NOT NULL DEFAULT 'Task',
///     team task_team NOT NULL DEFAULT 'Backend',
///     status task_status NOT NULL DEFAULT 'TODO',
///     comments JSONB NOT NULL DEFAULT '[]',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use super::priority::Priority;
use super::status_event::StatusEvent;
use crate::auth::context::RequestContext;
use crate::error::{DomainError, DomainResult};

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not yet started
    Todo,

    /// Currently being worked on
    InProgress,

    /// Under review
    InReview,

    /// Completed; terminal in the nominal ordering
    Done,
}

impl TaskStatus {
    /// Converts status to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::InReview => "IN_REVIEW",
            TaskStatus::Done => "DONE",
        }
    }

    /// Whether this is the terminal status of the nominal flow
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// All enumerated statuses, in board order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Kind of work a task represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_type")]
pub enum TaskType {
    Task,
    Bug,
    HotFix,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Task => "Task",
            TaskType::Bug => "Bug",
            TaskType::HotFix => "HotFix",
        }
    }
}

impl Default for TaskType {
    fn default() -> Self {
        TaskType::Task
    }
}

/// Team a task is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_team")]
pub enum Team {
    Frontend,
    Backend,
    #[sqlx(rename = "QA")]
    #[serde(rename = "QA")]
    Qa,
    Product,
    Business,
    Ops,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Frontend => "Frontend",
            Team::Backend => "Backend",
            Team::Qa => "QA",
            Team::Product => "Product",
            Team::Business => "Business",
            Team::Ops => "Ops",
        }
    }

    /// All enumerated teams, in display order
    pub const ALL: [Team; 6] = [
        Team::Frontend,
        Team::Backend,
        Team::Qa,
        Team::Product,
        Team::Business,
        Team::Ops,
    ];
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Organization this task belongs to
    pub organization_id: Uuid,

    /// Project this task belongs to
    pub project_id: Uuid,

    /// Story this task belongs to, if any
    pub story_id: Option<Uuid>,

    /// Task title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Assignee, by member name
    pub assigned_to: Option<String>,

    /// Planned start date (ISO date string)
    pub start_date: Option<String>,

    /// Planned end date (ISO date string)
    pub end_date: Option<String>,

    /// Target date (ISO date string)
    pub target_date: Option<String>,

    /// Story point estimate
    pub story_points: Option<i32>,

    /// Priority
    pub priority: Priority,

    /// Kind of work
    pub task_type: TaskType,

    /// Owning team
    pub team: Team,

    /// Workflow status
    pub status: TaskStatus,

    /// Comments as a JSONB array of {id, user, text, created_at}
    pub comments: JsonValue,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub project_id: Uuid,
    pub story_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_date: Option<String>,
    pub story_points: Option<i32>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, rename = "type")]
    pub task_type: TaskType,
    pub team: Team,
}

/// Input for updating an existing task (status excluded; see [`Task::set_status`])
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_date: Option<String>,
    pub story_points: Option<i32>,
    pub priority: Option<Priority>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    pub team: Option<Team>,
}

/// Filters for listing tasks, combined with AND
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub project_id: Option<Uuid>,
    pub story_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
}

/// A single task comment, stored inside the task's JSONB comment array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment with a fresh id and current timestamp
    pub fn new(user: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            text,
            created_at: Utc::now(),
        }
    }
}

impl Task {
    /// Creates a new task (status starts at TODO)
    pub async fn create(
        pool: &PgPool,
        organization_id: Uuid,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (organization_id, project_id, story_id, title, description,
                               assigned_to, start_date, end_date, target_date, story_points,
                               priority, task_type, team)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, organization_id, project_id, story_id, title, description,
                      assigned_to, start_date, end_date, target_date, story_points,
                      priority, task_type, team, status, comments, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(data.project_id)
        .bind(data.story_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.assigned_to)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.target_date)
        .bind(data.story_points)
        .bind(data.priority)
        .bind(data.task_type)
        .bind(data.team)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, organization_id, project_id, story_id, title, description,
                   assigned_to, start_date, end_date, target_date, story_points,
                   priority, task_type, team, status, comments, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks, optionally scoped to one organization, with filters
    pub async fn list(
        pool: &PgPool,
        scope: Option<Uuid>,
        filter: TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, organization_id, project_id, story_id, title, description,
                   assigned_to, start_date, end_date, target_date, story_points,
                   priority, task_type, team, status, comments, created_at, updated_at
            FROM tasks
            WHERE ($1::uuid IS NULL OR organization_id = $1)
              AND ($2::uuid IS NULL OR project_id = $2)
              AND ($3::uuid IS NULL OR story_id = $3)
              AND ($4::task_status IS NULL OR status = $4)
              AND ($5::varchar IS NULL OR assigned_to = $5)
            ORDER BY created_at DESC
            "#,
        )
        .bind(scope)
        .bind(filter.project_id)
        .bind(filter.story_id)
        .bind(filter.status)
        .bind(filter.assigned_to)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task's non-status fields
    ///
    /// Only non-None fields in `data` are written. Returns None if the task
    /// does not exist. Status never changes here; the single entry point for
    /// status writes is [`Task::set_status`].
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.assigned_to.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assigned_to = ${}", bind_count));
        }
        if data.start_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", start_date = ${}", bind_count));
        }
        if data.end_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", end_date = ${}", bind_count));
        }
        if data.target_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", target_date = ${}", bind_count));
        }
        if data.story_points.is_some() {
            bind_count += 1;
            query.push_str(&format!(", story_points = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.task_type.is_some() {
            bind_count += 1;
            query.push_str(&format!(", task_type = ${}", bind_count));
        }
        if data.team.is_some() {
            bind_count += 1;
            query.push_str(&format!(", team = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, organization_id, project_id, story_id, title, \
             description, assigned_to, start_date, end_date, target_date, story_points, \
             priority, task_type, team, status, comments, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(assigned_to) = data.assigned_to {
            q = q.bind(assigned_to);
        }
        if let Some(start_date) = data.start_date {
            q = q.bind(start_date);
        }
        if let Some(end_date) = data.end_date {
            q = q.bind(end_date);
        }
        if let Some(target_date) = data.target_date {
            q = q.bind(target_date);
        }
        if let Some(story_points) = data.story_points {
            q = q.bind(story_points);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(task_type) = data.task_type {
            q = q.bind(task_type);
        }
        if let Some(team) = data.team {
            q = q.bind(team);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Sets a task's status — the single mutation chokepoint
    ///
    /// Any target status is accepted from any current status; adjacency is
    /// deliberately not validated (a future policy would be added here, not
    /// at call sites). The write:
    ///
    /// 1. rejects tasks outside the caller's organization with
    ///    [`DomainError::CrossTenantAccess`],
    /// 2. updates the row (last-write-wins under concurrency),
    /// 3. appends a status event (actor, from, to, timestamp) in the same
    ///    transaction.
    pub async fn set_status(
        pool: &PgPool,
        ctx: &RequestContext,
        task_id: Uuid,
        status: TaskStatus,
    ) -> DomainResult<Self> {
        let task = Self::find_by_id(pool, task_id)
            .await?
            .ok_or(DomainError::NotFound("Task"))?;

        ctx.check_same_org(task.organization_id)?;

        let from = task.status;

        let mut tx = pool.begin().await?;

        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, organization_id, project_id, story_id, title, description,
                      assigned_to, start_date, end_date, target_date, story_points,
                      priority, task_type, team, status, comments, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        StatusEvent::append(
            &mut *tx,
            task.organization_id,
            task_id,
            ctx.actor_name(),
            from,
            status,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            task_id = %task_id,
            from = from.as_str(),
            to = status.as_str(),
            actor = ctx.actor_name(),
            "task status changed"
        );

        Ok(updated)
    }

    /// Appends a comment to a task's comment array
    ///
    /// Returns None if the task does not exist.
    pub async fn add_comment(
        pool: &PgPool,
        id: Uuid,
        comment: &Comment,
    ) -> Result<Option<Self>, sqlx::Error> {
        let payload = serde_json::to_value(comment).unwrap_or(JsonValue::Null);

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET comments = comments || jsonb_build_array($2::jsonb), updated_at = NOW()
            WHERE id = $1
            RETURNING id, organization_id, project_id, story_id, title, description,
                      assigned_to, start_date, end_date, target_date, story_points,
                      priority, task_type, team, status, comments, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(payload)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Counts tasks, optionally scoped to one organization
    pub async fn count(pool: &PgPool, scope: Option<Uuid>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tasks WHERE ($1::uuid IS NULL OR organization_id = $1)",
        )
        .bind(scope)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(TaskStatus::Todo.as_str(), "TODO");
        assert_eq!(TaskStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(TaskStatus::InReview.as_str(), "IN_REVIEW");
        assert_eq!(TaskStatus::Done.as_str(), "DONE");

        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let parsed: TaskStatus = serde_json::from_str("\"DONE\"").unwrap();
        assert_eq!(parsed, TaskStatus::Done);
    }

    #[test]
    fn test_unknown_status_fails_to_parse() {
        assert!(serde_json::from_str::<TaskStatus>("\"BLOCKED\"").is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"todo\"").is_err());
    }

    #[test]
    fn test_only_done_is_terminal() {
        assert!(TaskStatus::Done.is_done());
        assert!(!TaskStatus::Todo.is_done());
        assert!(!TaskStatus::InProgress.is_done());
        assert!(!TaskStatus::InReview.is_done());
    }

    #[test]
    fn test_task_type_and_team_strings() {
        assert_eq!(TaskType::HotFix.as_str(), "HotFix");
        assert_eq!(Team::Qa.as_str(), "QA");

        let json = serde_json::to_string(&Team::Qa).unwrap();
        assert_eq!(json, "\"QA\"");
    }

    #[test]
    fn test_create_task_accepts_type_alias() {
        // Wire field is "type", matching the original API
        let input: CreateTask = serde_json::from_str(
            r#"{
                "project_id": "6f3e0f37-53af-4a07-9e7b-3f6e9c4f2a10",
                "title": "Fix login",
                "type": "Bug",
                "team": "Backend"
            }"#,
        )
        .unwrap();

        assert_eq!(input.task_type, TaskType::Bug);
        assert_eq!(input.team, Team::Backend);
        assert_eq!(input.priority, Priority::Medium);
    }

    #[test]
    fn test_comment_new_sets_id_and_timestamp() {
        let a = Comment::new("Sam".to_string(), "looks good".to_string());
        let b = Comment::new("Sam".to_string(), "looks good".to_string());
        assert_ne!(a.id, b.id);
        assert_eq!(a.user, "Sam");
    }
}
