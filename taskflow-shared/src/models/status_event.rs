/// Task status event model
///
/// Append-only record of every task status change: who moved it, from which
/// state, to which state, and when. Events are written inside the same
/// transaction as the status update itself (see
/// [`Task::set_status`](super::task::Task::set_status)) and back the
/// per-task history endpoint. The dashboard aggregations recompute from
/// current task rows, not from this log.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_status_events (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     actor VARCHAR(255) NOT NULL,
///     from_status task_status NOT NULL,
///     to_status task_status NOT NULL,
///     ts TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::task::TaskStatus;

/// One recorded status change
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatusEvent {
    /// Unique event ID
    pub id: Uuid,

    /// Organization of the task at the time of the change
    pub organization_id: Uuid,

    /// Task whose status changed
    pub task_id: Uuid,

    /// Display name of the user who made the change
    pub actor: String,

    /// Status before the change
    pub from_status: TaskStatus,

    /// Status after the change
    pub to_status: TaskStatus,

    /// When the change happened
    pub ts: DateTime<Utc>,
}

impl StatusEvent {
    /// Appends a status event
    ///
    /// Takes any executor so it can run inside the status-update transaction.
    pub async fn append<'e>(
        executor: impl PgExecutor<'e>,
        organization_id: Uuid,
        task_id: Uuid,
        actor: &str,
        from_status: TaskStatus,
        to_status: TaskStatus,
    ) -> Result<Self, sqlx::Error> {
        let event = sqlx::query_as::<_, StatusEvent>(
            r#"
            INSERT INTO task_status_events (organization_id, task_id, actor, from_status, to_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organization_id, task_id, actor, from_status, to_status, ts
            "#,
        )
        .bind(organization_id)
        .bind(task_id)
        .bind(actor)
        .bind(from_status)
        .bind(to_status)
        .fetch_one(executor)
        .await?;

        Ok(event)
    }

    /// Lists events for one task, oldest first
    pub async fn list_by_task(pool: &PgPool, task_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let events = sqlx::query_as::<_, StatusEvent>(
            r#"
            SELECT id, organization_id, task_id, actor, from_status, to_status, ts
            FROM task_status_events
            WHERE task_id = $1
            ORDER BY ts ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(events)
    }
}
