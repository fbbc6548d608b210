/// User model and database operations
///
/// Users carry a fixed role for their whole lifetime; roles never transition.
/// Every user belongs to exactly one organization except SuperAdmin, whose
/// `organization_id` is NULL and who operates across tenants.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('SuperAdmin', 'Admin', 'Product', 'Developer', 'Ops');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     organization_id UUID REFERENCES organizations(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role user_role NOT NULL,
///     avatar TEXT NOT NULL DEFAULT '',
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     last_login_at TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_superadmin_org_check CHECK (
///         role = 'SuperAdmin' OR organization_id IS NOT NULL
///     )
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Fixed user roles
///
/// Serialized exactly as displayed ("SuperAdmin", "Admin", ...). What each
/// role may do is decided by the permission evaluator in
/// [`crate::auth::permissions`], not by methods here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum Role {
    /// Cross-tenant administrator; the only role with no organization
    SuperAdmin,

    /// Organization administrator
    Admin,

    /// Product manager
    Product,

    /// Developer
    Developer,

    /// Operations
    Ops,
}

impl Role {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SuperAdmin",
            Role::Admin => "Admin",
            Role::Product => "Product",
            Role::Developer => "Developer",
            Role::Ops => "Ops",
        }
    }

    /// All enumerated roles, for exhaustive table checks
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Product,
        Role::Developer,
        Role::Ops,
    ];
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Organization the user belongs to; None only for SuperAdmin
    pub organization_id: Option<Uuid>,

    /// Display name (tasks reference assignees by this name)
    pub name: String,

    /// Unique email address, used for login
    pub email: String,

    /// Argon2 password hash; never serialized in responses
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Fixed role
    pub role: Role,

    /// Avatar as a data URL, empty if unset
    pub avatar: String,

    /// Whether the account may log in
    pub is_active: bool,

    /// Last successful login
    pub last_login_at: Option<DateTime<Utc>>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub organization_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub avatar: String,
}

impl User {
    /// Creates a new user
    ///
    /// Takes any executor so account provisioning can run inside the same
    /// transaction as the rows it accompanies (organization creation pairs
    /// the tenant row with its first Admin).
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint violation if the email is taken, or a
    /// check-constraint violation if a non-SuperAdmin is created without an
    /// organization.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateUser,
    ) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (organization_id, name, email, password_hash, role, avatar)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, organization_id, name, email, password_hash, role, avatar,
                      is_active, last_login_at, created_at
            "#,
        )
        .bind(data.organization_id)
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(data.avatar)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, organization_id, name, email, password_hash, role, avatar,
                   is_active, last_login_at, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email (used for login)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, organization_id, name, email, password_hash, role, avatar,
                   is_active, last_login_at, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists users, optionally scoped to one organization
    ///
    /// `scope = None` is the unscoped SuperAdmin view.
    pub async fn list(pool: &PgPool, scope: Option<Uuid>) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, organization_id, name, email, password_hash, role, avatar,
                   is_active, last_login_at, created_at
            FROM users
            WHERE ($1::uuid IS NULL OR organization_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(scope)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Counts users, optionally scoped to one organization
    pub async fn count(pool: &PgPool, scope: Option<Uuid>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users WHERE ($1::uuid IS NULL OR organization_id = $1)",
        )
        .bind(scope)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Records a successful login
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
