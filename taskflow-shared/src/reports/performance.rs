/// Member performance
///
/// Per-member task totals, completion rate, and accumulated story points.
/// Tasks are matched to members by assignee name, which is how assignment is
/// recorded on the task row.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::task::{Task, TaskFilter, TaskStatus};
use crate::models::user::{Role, User};

/// One member's rollup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPerformance {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub in_progress_tasks: i64,
    /// Percentage of completed tasks, rounded to one decimal. 0 when the
    /// member has no tasks.
    pub completion_rate: f64,
    pub total_story_points: i64,
}

/// Computes per-member performance from fetched rows
///
/// Output order follows the member list, so it is stable across calls.
pub fn compute_performance(members: &[User], tasks: &[Task]) -> Vec<MemberPerformance> {
    members
        .iter()
        .map(|member| {
            let mine: Vec<&Task> = tasks
                .iter()
                .filter(|t| t.assigned_to.as_deref() == Some(member.name.as_str()))
                .collect();

            let total = mine.len() as i64;
            let completed = mine
                .iter()
                .filter(|t| t.status == TaskStatus::Done)
                .count() as i64;
            let in_progress = mine
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count() as i64;
            let story_points: i64 = mine
                .iter()
                .filter_map(|t| t.story_points)
                .map(i64::from)
                .sum();

            let completion_rate = if total == 0 {
                0.0
            } else {
                (completed as f64 / total as f64 * 1000.0).round() / 10.0
            };

            MemberPerformance {
                name: member.name.clone(),
                email: member.email.clone(),
                role: member.role,
                total_tasks: total,
                completed_tasks: completed,
                in_progress_tasks: in_progress,
                completion_rate,
                total_story_points: story_points,
            }
        })
        .collect()
}

/// Builds the performance report for one organization scope
pub async fn member_performance(
    pool: &PgPool,
    scope: Option<Uuid>,
) -> Result<Vec<MemberPerformance>, sqlx::Error> {
    let members = User::list(pool, scope).await?;
    let tasks = Task::list(pool, scope, TaskFilter::default()).await?;
    Ok(compute_performance(&members, &tasks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::priority::Priority;
    use crate::models::task::Team;
    use crate::reports::test_fixtures::task;
    use chrono::Utc;
    use uuid::Uuid;

    fn member(name: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            organization_id: Some(Uuid::new_v4()),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: String::new(),
            role,
            avatar: String::new(),
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_completion_rate_and_story_points() {
        let members = vec![member("Dana", Role::Developer)];
        let tasks = vec![
            task(Team::Backend, TaskStatus::Done, Priority::Medium, Some("Dana"), Some(3)),
            task(Team::Backend, TaskStatus::Done, Priority::Medium, Some("Dana"), Some(5)),
            task(Team::Backend, TaskStatus::InProgress, Priority::Medium, Some("Dana"), Some(2)),
        ];

        let report = compute_performance(&members, &tasks);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].total_tasks, 3);
        assert_eq!(report[0].completed_tasks, 2);
        assert_eq!(report[0].in_progress_tasks, 1);
        assert!((report[0].completion_rate - 66.7).abs() < 1e-9);
        assert_eq!(report[0].total_story_points, 10);
    }

    #[test]
    fn test_member_with_no_tasks_has_zero_rate() {
        let members = vec![member("Idle", Role::Ops)];
        let report = compute_performance(&members, &[]);
        assert_eq!(report[0].total_tasks, 0);
        assert_eq!(report[0].completion_rate, 0.0);
    }

    #[test]
    fn test_tasks_are_matched_by_assignee_name() {
        let members = vec![member("Dana", Role::Developer), member("Eli", Role::Product)];
        let tasks = vec![
            task(Team::Frontend, TaskStatus::Done, Priority::Low, Some("Dana"), None),
            task(Team::Frontend, TaskStatus::Todo, Priority::Low, None, None),
        ];

        let report = compute_performance(&members, &tasks);
        assert_eq!(report[0].total_tasks, 1);
        assert_eq!(report[1].total_tasks, 0);
    }
}
