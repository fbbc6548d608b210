/// Dashboard statistics
///
/// Entity totals plus task breakdowns by status and by elevated priority,
/// all scoped to the caller's organization before this module is reached.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::priority::Priority;
use crate::models::project::Project;
use crate::models::story::Story;
use crate::models::task::{Task, TaskFilter, TaskStatus};
use crate::models::user::User;

/// Task counts per status column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBreakdown {
    pub todo: i64,
    pub in_progress: i64,
    pub in_review: i64,
    pub done: i64,
}

/// Counts of elevated-priority tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub high: i64,
    pub critical: i64,
}

/// The dashboard stats payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub total_tasks: i64,
    pub total_stories: i64,
    pub total_members: i64,
    pub task_breakdown: TaskBreakdown,
    pub priority_breakdown: PriorityBreakdown,
}

/// Computes the task portion of the stats from fetched rows
pub fn compute_task_breakdowns(tasks: &[Task]) -> (TaskBreakdown, PriorityBreakdown) {
    let mut by_status = TaskBreakdown {
        todo: 0,
        in_progress: 0,
        in_review: 0,
        done: 0,
    };
    let mut by_priority = PriorityBreakdown {
        high: 0,
        critical: 0,
    };

    for task in tasks {
        match task.status {
            TaskStatus::Todo => by_status.todo += 1,
            TaskStatus::InProgress => by_status.in_progress += 1,
            TaskStatus::InReview => by_status.in_review += 1,
            TaskStatus::Done => by_status.done += 1,
        }
        match task.priority {
            Priority::High => by_priority.high += 1,
            Priority::Critical => by_priority.critical += 1,
            Priority::Low | Priority::Medium => {}
        }
    }

    (by_status, by_priority)
}

/// Builds the full dashboard stats for one organization scope
///
/// `scope = None` is the unscoped SuperAdmin view.
pub async fn dashboard_stats(
    pool: &PgPool,
    scope: Option<Uuid>,
) -> Result<DashboardStats, sqlx::Error> {
    let total_projects = Project::count(pool, scope).await?;
    let total_stories = Story::count(pool, scope).await?;
    let total_members = User::count(pool, scope).await?;

    let tasks = Task::list(pool, scope, TaskFilter::default()).await?;
    let (task_breakdown, priority_breakdown) = compute_task_breakdowns(&tasks);

    Ok(DashboardStats {
        total_projects,
        total_tasks: tasks.len() as i64,
        total_stories,
        total_members,
        task_breakdown,
        priority_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::Team;
    use crate::reports::test_fixtures::task;

    #[test]
    fn test_breakdowns_over_mixed_tasks() {
        let tasks = vec![
            task(Team::Backend, TaskStatus::Todo, Priority::Low, None, None),
            task(Team::Backend, TaskStatus::Todo, Priority::High, None, None),
            task(Team::Backend, TaskStatus::InProgress, Priority::Critical, None, None),
            task(Team::Qa, TaskStatus::InReview, Priority::Medium, None, None),
            task(Team::Qa, TaskStatus::Done, Priority::High, None, None),
        ];

        let (by_status, by_priority) = compute_task_breakdowns(&tasks);

        assert_eq!(by_status.todo, 2);
        assert_eq!(by_status.in_progress, 1);
        assert_eq!(by_status.in_review, 1);
        assert_eq!(by_status.done, 1);

        assert_eq!(by_priority.high, 2);
        assert_eq!(by_priority.critical, 1);
    }

    #[test]
    fn test_breakdowns_over_no_tasks() {
        let (by_status, by_priority) = compute_task_breakdowns(&[]);
        assert_eq!(by_status.todo + by_status.in_progress + by_status.in_review + by_status.done, 0);
        assert_eq!(by_priority.high, 0);
        assert_eq!(by_priority.critical, 0);
    }

    #[test]
    fn test_status_change_moves_the_count() {
        // A status write is reflected in the next recomputation
        let mut tasks = vec![task(Team::Backend, TaskStatus::Todo, Priority::Low, None, None)];
        let (before, _) = compute_task_breakdowns(&tasks);
        assert_eq!((before.todo, before.done), (1, 0));

        tasks[0].status = TaskStatus::Done;
        let (after, _) = compute_task_breakdowns(&tasks);
        assert_eq!((after.todo, after.done), (0, 1));
    }
}
