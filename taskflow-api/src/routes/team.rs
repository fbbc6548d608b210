/// Team endpoints
///
/// Accounts are provisioned, never self-registered: the SuperAdmin comes
/// from bootstrap, each organization's Admin from organization creation,
/// and everyone else from here. New members get a generated temporary
/// password, returned exactly once.
///
/// # Endpoints
///
/// - `GET /v1/team` - List members in the caller's scope
/// - `POST /v1/team` - Provision a member

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::resolve_context,
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use taskflow_shared::{
    auth::{jwt::Claims, password, permissions::Capability},
    models::{
        organization::Organization,
        user::{CreateUser, Role, User},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Provision member request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Fixed role; SuperAdmin cannot be provisioned here
    pub role: Role,

    #[serde(default)]
    pub avatar: String,

    /// Target organization; only meaningful for SuperAdmin
    pub organization_id: Option<Uuid>,
}

/// Provision member response
#[derive(Debug, Serialize)]
pub struct CreateMemberResponse {
    pub user: User,
    pub temp_password: String,
}

/// Lists organization members
///
/// SuperAdmin sees every user across organizations; Admin sees their own
/// organization. Other roles are denied by the permission table.
pub async fn list_team(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<User>>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewTeam)?;

    let members = User::list(&state.db, ctx.scope()).await?;
    Ok(Json(members))
}

/// Provisions a new member with a generated temporary password
///
/// # Errors
///
/// - `404 Not Found`: Named target organization does not exist
/// - `409 Conflict`: Email already taken
/// - `422 Unprocessable Entity`: SuperAdmin role requested, or no target
///   organization
pub async fn create_member(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateMemberRequest>,
) -> ApiResult<Json<CreateMemberResponse>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewTeam)?;
    req.validate()?;

    if req.role == Role::SuperAdmin {
        return Err(ApiError::Validation {
            message: "SuperAdmin accounts cannot be provisioned through the team API".to_string(),
            details: None,
        });
    }

    let organization_id = match req.organization_id {
        Some(id) => {
            ctx.check_same_org(id)?;
            // Only the unscoped SuperAdmin can name an arbitrary id here,
            // so resolve it rather than letting the FK surface as a 409.
            if Organization::find_by_id(&state.db, id).await?.is_none() {
                return Err(ApiError::UnknownOrganization(format!(
                    "Unknown organization: {}",
                    id
                )));
            }
            id
        }
        None => ctx.require_org()?,
    };

    let temp_password = password::generate_temp_password();
    let password_hash = password::hash_password(&temp_password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            organization_id: Some(organization_id),
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role,
            avatar: req.avatar,
        },
    )
    .await?;

    tracing::info!(
        user_id = %user.id,
        organization_id = %organization_id,
        role = user.role.as_str(),
        "member provisioned"
    );

    Ok(Json(CreateMemberResponse {
        user,
        temp_password,
    }))
}
