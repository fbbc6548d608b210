/// Story model and database operations
///
/// A story groups related tasks under a project and carries its requirement
/// documentation: a business requirement document (BRD) and a product
/// requirement document (PRD), both free text.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE stories (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     brd TEXT NOT NULL DEFAULT '',
///     prd TEXT NOT NULL DEFAULT '',
///     priority priority NOT NULL DEFAULT 'Medium',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::priority::Priority;

/// Story model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Story {
    /// Unique story ID
    pub id: Uuid,

    /// Organization this story belongs to
    pub organization_id: Uuid,

    /// Project this story belongs to
    pub project_id: Uuid,

    /// Story title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Business requirement text
    pub brd: String,

    /// Product requirement text
    pub prd: String,

    /// Priority (Low, Medium, High, Critical)
    pub priority: Priority,

    /// When the story was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStory {
    pub project_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brd: String,
    #[serde(default)]
    pub prd: String,
    #[serde(default)]
    pub priority: Priority,
}

/// Input for updating an existing story
///
/// Only non-None fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStory {
    pub title: Option<String>,
    pub description: Option<String>,
    pub brd: Option<String>,
    pub prd: Option<String>,
    pub priority: Option<Priority>,
}

impl UpdateStory {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.brd.is_none()
            && self.prd.is_none()
            && self.priority.is_none()
    }
}

impl Story {
    /// Creates a new story
    pub async fn create(
        pool: &PgPool,
        organization_id: Uuid,
        data: CreateStory,
    ) -> Result<Self, sqlx::Error> {
        let story = sqlx::query_as::<_, Story>(
            r#"
            INSERT INTO stories (organization_id, project_id, title, description, brd, prd, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, organization_id, project_id, title, description, brd, prd,
                      priority, created_at
            "#,
        )
        .bind(organization_id)
        .bind(data.project_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.brd)
        .bind(data.prd)
        .bind(data.priority)
        .fetch_one(pool)
        .await?;

        Ok(story)
    }

    /// Finds a story by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let story = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, organization_id, project_id, title, description, brd, prd,
                   priority, created_at
            FROM stories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(story)
    }

    /// Lists stories, optionally scoped to one organization and one project
    pub async fn list(
        pool: &PgPool,
        scope: Option<Uuid>,
        project_id: Option<Uuid>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let stories = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, organization_id, project_id, title, description, brd, prd,
                   priority, created_at
            FROM stories
            WHERE ($1::uuid IS NULL OR organization_id = $1)
              AND ($2::uuid IS NULL OR project_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(scope)
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(stories)
    }

    /// Updates a story
    ///
    /// Only non-None fields in `data` are written. Returns None if the story
    /// does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateStory,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE stories SET id = id");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.brd.is_some() {
            bind_count += 1;
            query.push_str(&format!(", brd = ${}", bind_count));
        }
        if data.prd.is_some() {
            bind_count += 1;
            query.push_str(&format!(", prd = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, organization_id, project_id, title, description, \
             brd, prd, priority, created_at",
        );

        let mut q = sqlx::query_as::<_, Story>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(brd) = data.brd {
            q = q.bind(brd);
        }
        if let Some(prd) = data.prd {
            q = q.bind(prd);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }

        let story = q.fetch_optional(pool).await?;

        Ok(story)
    }

    /// Counts stories, optionally scoped to one organization
    pub async fn count(pool: &PgPool, scope: Option<Uuid>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM stories WHERE ($1::uuid IS NULL OR organization_id = $1)",
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
    fn test_update_story_is_empty() {
        assert!(UpdateStory::default().is_empty());

        let update = UpdateStory {
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
