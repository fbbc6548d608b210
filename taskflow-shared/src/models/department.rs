/// Department model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE departments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     color VARCHAR(16) NOT NULL DEFAULT '#3B82F6',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Department within an organization
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    /// Unique department ID
    pub id: Uuid,

    /// Organization this department belongs to
    pub organization_id: Uuid,

    /// Department name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Display color (hex)
    pub color: String,

    /// When the department was created
    pub created_at: DateTime<Utc>,
}

fn default_color() -> String {
    "#3B82F6".to_string()
}

/// Input for creating a new department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Department {
    /// Creates a new department
    pub async fn create(
        pool: &PgPool,
        organization_id: Uuid,
        data: CreateDepartment,
    ) -> Result<Self, sqlx::Error> {
        let dept = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (organization_id, name, description, color)
            VALUES ($1, $2, $3, $4)
            RETURNING id, organization_id, name, description, color, created_at
            "#,
        )
        .bind(organization_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.color)
        .fetch_one(pool)
        .await?;

        Ok(dept)
    }

    /// Lists departments, optionally scoped to one organization
    pub async fn list(pool: &PgPool, scope: Option<Uuid>) -> Result<Vec<Self>, sqlx::Error> {
        let depts = sqlx::query_as::<_, Department>(
            r#"
            SELECT id, organization_id, name, description, color, created_at
            FROM departments
            WHERE ($1::uuid IS NULL OR organization_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(scope)
        .fetch_all(pool)
        .await?;

        Ok(depts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_department_default_color() {
        let input: CreateDepartment =
            serde_json::from_str(r#"{"name": "Platform"}"#).unwrap();
        assert_eq!(input.color, "#3B82F6");
        assert!(input.description.is_empty());
    }
}
