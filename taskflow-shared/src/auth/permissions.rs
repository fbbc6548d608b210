/// Permission evaluator
///
/// Maps (role, capability) to allow/deny. The table is a single exhaustive
/// match over the capability enum, so adding a capability without deciding
/// its permitted roles is a compile error — nothing ever defaults to
/// permissive. Evaluation is stateless, deterministic, and total over the
/// enumerated domain.
///
/// # Permission Table
///
/// | capability                          | SuperAdmin | Admin | Product | Developer | Ops |
/// |-------------------------------------|------------|-------|---------|-----------|-----|
/// | view_dashboard / view_todo / view_weekly | ✓     | ✓     | ✓       | ✓         | ✓   |
/// | view_projects / view_kanban         | ✓          | ✓     | ✓       | ✓         | –   |
/// | view_team / view_departments / view_performance | ✓ | ✓  | –       | –         | –   |
/// | view_organizations                  | ✓          | –     | –       | –         | –   |
/// | create_project / create_story       | ✓          | ✓     | ✓       | –         | –   |
/// | create_task                         | ✓          | ✓     | ✓       | ✓         | –   |
/// | update_task_status                  | ✓          | ✓     | –       | ✓         | –   |

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::models::user::Role;

/// The fixed set of named permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewDashboard,
    ViewProjects,
    ViewKanban,
    ViewTodo,
    ViewWeekly,
    ViewTeam,
    ViewDepartments,
    ViewPerformance,
    ViewOrganizations,
    CreateProject,
    CreateStory,
    CreateTask,
    UpdateTaskStatus,
}

impl Capability {
    /// Converts capability to its wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewDashboard => "view_dashboard",
            Capability::ViewProjects => "view_projects",
            Capability::ViewKanban => "view_kanban",
            Capability::ViewTodo => "view_todo",
            Capability::ViewWeekly => "view_weekly",
            Capability::ViewTeam => "view_team",
            Capability::ViewDepartments => "view_departments",
            Capability::ViewPerformance => "view_performance",
            Capability::ViewOrganizations => "view_organizations",
            Capability::CreateProject => "create_project",
            Capability::CreateStory => "create_story",
            Capability::CreateTask => "create_task",
            Capability::UpdateTaskStatus => "update_task_status",
        }
    }

    /// Parses a capability name
    ///
    /// # Errors
    ///
    /// Names outside the enumerated set fail with
    /// [`DomainError::UnknownCapability`]; there is no permissive fallback.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "view_dashboard" => Ok(Capability::ViewDashboard),
            "view_projects" => Ok(Capability::ViewProjects),
            "view_kanban" => Ok(Capability::ViewKanban),
            "view_todo" => Ok(Capability::ViewTodo),
            "view_weekly" => Ok(Capability::ViewWeekly),
            "view_team" => Ok(Capability::ViewTeam),
            "view_departments" => Ok(Capability::ViewDepartments),
            "view_performance" => Ok(Capability::ViewPerformance),
            "view_organizations" => Ok(Capability::ViewOrganizations),
            "create_project" => Ok(Capability::CreateProject),
            "create_story" => Ok(Capability::CreateStory),
            "create_task" => Ok(Capability::CreateTask),
            "update_task_status" => Ok(Capability::UpdateTaskStatus),
            other => Err(DomainError::UnknownCapability(other.to_string())),
        }
    }

    /// All enumerated capabilities, for exhaustive table checks
    pub const ALL: [Capability; 13] = [
        Capability::ViewDashboard,
        Capability::ViewProjects,
        Capability::ViewKanban,
        Capability::ViewTodo,
        Capability::ViewWeekly,
        Capability::ViewTeam,
        Capability::ViewDepartments,
        Capability::ViewPerformance,
        Capability::ViewOrganizations,
        Capability::CreateProject,
        Capability::CreateStory,
        Capability::CreateTask,
        Capability::UpdateTaskStatus,
    ];
}

/// Decides whether `role` is permitted `capability`
///
/// Pure and total: every (role, capability) pair in the enumerated domain
/// has a fixed answer, and the match is exhaustive over capabilities.
pub fn allowed(role: Role, capability: Capability) -> bool {
    use Capability::*;

    match capability {
        ViewDashboard | ViewTodo | ViewWeekly => true,
        ViewProjects | ViewKanban => !matches!(role, Role::Ops),
        ViewTeam | ViewDepartments | ViewPerformance => {
            matches!(role, Role::SuperAdmin | Role::Admin)
        }
        ViewOrganizations => matches!(role, Role::SuperAdmin),
        CreateProject | CreateStory => {
            matches!(role, Role::SuperAdmin | Role::Admin | Role::Product)
        }
        CreateTask => matches!(
            role,
            Role::SuperAdmin | Role::Admin | Role::Product | Role::Developer
        ),
        UpdateTaskStatus => matches!(role, Role::SuperAdmin | Role::Admin | Role::Developer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// The permission table, written out pair by pair. `allowed` must agree
    /// with it on every (role, capability) combination.
    fn table() -> HashSet<(Role, Capability)> {
        use Capability::*;
        use Role::*;

        let mut t = HashSet::new();
        for cap in Capability::ALL {
            t.insert((SuperAdmin, cap));
        }
        for cap in [
            ViewDashboard,
            ViewTodo,
            ViewWeekly,
            ViewProjects,
            ViewKanban,
            ViewTeam,
            ViewDepartments,
            ViewPerformance,
            CreateProject,
            CreateStory,
            CreateTask,
            UpdateTaskStatus,
        ] {
            t.insert((Admin, cap));
        }
        for cap in [
            ViewDashboard,
            ViewTodo,
            ViewWeekly,
            ViewProjects,
            ViewKanban,
            CreateProject,
            CreateStory,
            CreateTask,
        ] {
            t.insert((Product, cap));
        }
        for cap in [
            ViewDashboard,
            ViewTodo,
            ViewWeekly,
            ViewProjects,
            ViewKanban,
            CreateTask,
            UpdateTaskStatus,
        ] {
            t.insert((Developer, cap));
        }
        for cap in [ViewDashboard, ViewTodo, ViewWeekly] {
            t.insert((Ops, cap));
        }
        t
    }

    #[test]
    fn test_allowed_matches_table_exactly() {
        let table = table();
        for role in Role::ALL {
            for cap in Capability::ALL {
                assert_eq!(
                    allowed(role, cap),
                    table.contains(&(role, cap)),
                    "mismatch for ({:?}, {:?})",
                    role,
                    cap
                );
            }
        }
    }

    #[test]
    fn test_super_admin_is_allowed_everything() {
        for cap in Capability::ALL {
            assert!(allowed(Role::SuperAdmin, cap), "denied {:?}", cap);
        }
    }

    #[test]
    fn test_ops_cannot_view_projects() {
        assert!(!allowed(Role::Ops, Capability::ViewProjects));
        assert!(!allowed(Role::Ops, Capability::ViewKanban));
    }

    #[test]
    fn test_product_cannot_update_task_status() {
        assert!(!allowed(Role::Product, Capability::UpdateTaskStatus));
        assert!(allowed(Role::Developer, Capability::UpdateTaskStatus));
    }

    #[test]
    fn test_only_super_admin_views_organizations() {
        assert!(allowed(Role::SuperAdmin, Capability::ViewOrganizations));
        for role in [Role::Admin, Role::Product, Role::Developer, Role::Ops] {
            assert!(!allowed(role, Capability::ViewOrganizations));
        }
    }

    #[test]
    fn test_capability_parse_round_trip() {
        for cap in Capability::ALL {
            assert_eq!(Capability::parse(cap.as_str()).unwrap(), cap);
        }
    }

    #[test]
    fn test_unknown_capability_is_an_error() {
        let err = Capability::parse("delete_everything").unwrap_err();
        assert!(matches!(err, DomainError::UnknownCapability(_)));
        assert!(err.to_string().contains("delete_everything"));
    }
}
