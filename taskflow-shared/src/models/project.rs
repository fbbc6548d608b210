/// Project model and database operations
///
/// Projects are the top-level container for stories and tasks within an
/// organization.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Organization this project belongs to
    pub organization_id: Uuid,

    /// Project name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Project {
    /// Creates a new project within an organization
    pub async fn create(
        pool: &PgPool,
        organization_id: Uuid,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (organization_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, organization_id, name, description, created_at
            "#,
        )
        .bind(organization_id)
        .bind(data.name)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    ///
    /// Tenancy is checked by the caller via the request context, not here.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, organization_id, name, description, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists projects, optionally scoped to one organization, newest first
    pub async fn list(pool: &PgPool, scope: Option<Uuid>) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, organization_id, name, description, created_at
            FROM projects
            WHERE ($1::uuid IS NULL OR organization_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(scope)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Counts projects, optionally scoped to one organization
    pub async fn count(pool: &PgPool, scope: Option<Uuid>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM projects WHERE ($1::uuid IS NULL OR organization_id = $1)",
        )
        .bind(scope)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
