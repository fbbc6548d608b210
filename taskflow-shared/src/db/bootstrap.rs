/// First-run provisioning
///
/// Creates the SuperAdmin account on startup if it does not exist yet, so a
/// freshly migrated database can be logged into. Organization admins are
/// provisioned later through the organizations API.

use sqlx::PgPool;
use tracing::info;

use crate::auth::password::hash_password;
use crate::error::DomainResult;
use crate::models::user::{CreateUser, Role, User};

/// Ensures the SuperAdmin account exists
///
/// Idempotent: if a user with `email` already exists, nothing is written and
/// the existing user is returned.
pub async fn ensure_super_admin(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> DomainResult<User> {
    if let Some(existing) = User::find_by_email(pool, email).await? {
        return Ok(existing);
    }

    let user = User::create(
        pool,
        CreateUser {
            organization_id: None,
            name: "Super Admin".to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)
                .map_err(|e| crate::error::DomainError::Validation(e.to_string()))?,
            role: Role::SuperAdmin,
            avatar: String::new(),
        },
    )
    .await?;

    info!(email = email, "super admin account provisioned");

    Ok(user)
}
