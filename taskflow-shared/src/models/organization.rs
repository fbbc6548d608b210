/// Organization model and database operations
///
/// Organizations are the tenant boundary for TaskFlow. All projects, stories,
/// tasks, departments, and non-SuperAdmin users belong to exactly one
/// organization, and every scoped query filters on its id.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     subdomain VARCHAR(100) NOT NULL UNIQUE,
///     logo TEXT NOT NULL DEFAULT '',
///     theme JSONB NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::organization::{CreateOrganization, Organization, Theme};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let org = Organization::create(&pool, CreateOrganization {
///     name: "Acme Corp".to_string(),
///     subdomain: "acme".to_string(),
///     logo: String::new(),
///     theme: Theme::default(),
/// }).await?;
/// println!("Created organization {}", org.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Five named theme colors used for organization branding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub sidebar_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#1E40AF".to_string(),
            secondary_color: "#3B82F6".to_string(),
            accent_color: "#F59E0B".to_string(),
            background_color: "#F8FAFC".to_string(),
            sidebar_color: "#1E293B".to_string(),
        }
    }
}

/// Organization model representing an isolated customer account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Unique organization ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Unique subdomain used to address the organization
    pub subdomain: String,

    /// Logo as a data URL, empty if unset
    pub logo: String,

    /// Theme colors (JSONB; see [`Theme`])
    pub theme: JsonValue,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub subdomain: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub theme: Theme,
}

/// Input for updating an existing organization
///
/// Only non-None fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub theme: Option<Theme>,
}

impl Organization {
    /// Creates a new organization
    ///
    /// Takes any executor so the tenant row and its provisioned Admin can be
    /// written in one transaction.
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint violation if the subdomain is taken.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateOrganization,
    ) -> Result<Self, sqlx::Error> {
        let theme = serde_json::to_value(&data.theme).unwrap_or(JsonValue::Null);

        let org = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, subdomain, logo, theme)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, subdomain, logo, theme, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.subdomain)
        .bind(data.logo)
        .bind(theme)
        .fetch_one(executor)
        .await?;

        Ok(org)
    }

    /// Finds an organization by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, subdomain, logo, theme, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(org)
    }

    /// Lists all organizations, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let orgs = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, subdomain, logo, theme, created_at, updated_at
            FROM organizations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(orgs)
    }

    /// Updates an organization's branding
    ///
    /// Only non-None fields in `data` are written. Returns None if the
    /// organization does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateOrganization,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE organizations SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.logo.is_some() {
            bind_count += 1;
            query.push_str(&format!(", logo = ${}", bind_count));
        }
        if data.theme.is_some() {
            bind_count += 1;
            query.push_str(&format!(", theme = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, name, subdomain, logo, theme, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Organization>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(logo) = data.logo {
            q = q.bind(logo);
        }
        if let Some(theme) = data.theme {
            q = q.bind(serde_json::to_value(&theme).unwrap_or(JsonValue::Null));
        }

        let org = q.fetch_optional(pool).await?;

        Ok(org)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_has_five_colors() {
        let theme = Theme::default();
        let value = serde_json::to_value(&theme).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert!(obj.contains_key("primary_color"));
        assert!(obj.contains_key("sidebar_color"));
    }

    // Integration tests for database operations live with the API tests.
}
