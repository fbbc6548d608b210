/// Weekly summary
///
/// Tasks grouped by team with per-group totals, done and in-progress counts,
/// a progress ratio, and up to five representative tasks per team.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::priority::Priority;
use crate::models::task::{Task, TaskFilter, TaskStatus, Team};

/// How many representative tasks each team summary carries
const REPRESENTATIVE_TASKS: usize = 5;

/// A trimmed task view for the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDigest {
    pub id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub assigned_to: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_date: Option<String>,
    pub priority: Priority,
}

impl TaskDigest {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            status: task.status,
            assigned_to: task
                .assigned_to
                .clone()
                .unwrap_or_else(|| "Unassigned".to_string()),
            start_date: task.start_date.clone(),
            end_date: task.end_date.clone(),
            target_date: task.target_date.clone(),
            priority: task.priority,
        }
    }
}

/// Per-team rollup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team: Team,
    pub total: i64,
    pub done: i64,
    pub in_progress: i64,
    /// done / total, 0.0 for an empty team
    pub progress: f64,
    pub tasks: Vec<TaskDigest>,
}

/// The weekly summary payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub teams: Vec<TeamSummary>,
}

/// Computes the weekly summary from fetched rows
///
/// Teams with no tasks are omitted; team order follows [`Team::ALL`] so the
/// output is deterministic.
pub fn compute_weekly_summary(tasks: &[Task]) -> WeeklySummary {
    let teams = Team::ALL
        .iter()
        .filter_map(|&team| {
            let team_tasks: Vec<&Task> = tasks.iter().filter(|t| t.team == team).collect();
            if team_tasks.is_empty() {
                return None;
            }

            let total = team_tasks.len() as i64;
            let done = team_tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Done)
                .count() as i64;
            let in_progress = team_tasks
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count() as i64;

            Some(TeamSummary {
                team,
                total,
                done,
                in_progress,
                progress: done as f64 / total as f64,
                tasks: team_tasks
                    .iter()
                    .take(REPRESENTATIVE_TASKS)
                    .map(|t| TaskDigest::from_task(t))
                    .collect(),
            })
        })
        .collect();

    WeeklySummary { teams }
}

/// Builds the weekly summary for one organization scope
pub async fn weekly_summary(
    pool: &PgPool,
    scope: Option<Uuid>,
) -> Result<WeeklySummary, sqlx::Error> {
    let tasks = Task::list(pool, scope, TaskFilter::default()).await?;
    Ok(compute_weekly_summary(&tasks))
}
