/// Database models for TaskFlow
///
/// This module contains all database models and their CRUD operations.
/// Every row except SuperAdmin users belongs to exactly one organization;
/// list operations take an `Option<Uuid>` organization scope and callers
/// obtain that scope from the resolved request context, never ad hoc.
///
/// # Models
///
/// - `organization`: Tenants with branding and theme
/// - `user`: Accounts with a fixed role (SuperAdmin, Admin, Product, Developer, Ops)
/// - `project`: Top-level container for stories and tasks
/// - `story`: Requirement grouping with BRD/PRD text
/// - `task`: Atomic unit of work with status, priority, type, and team
/// - `department`: Named organizational unit with a display color
/// - `status_event`: Append-only record of task status changes

pub mod department;
pub mod organization;
pub mod priority;
pub mod project;
pub mod status_event;
pub mod story;
pub mod task;
pub mod user;
