/// Organization administration endpoints
///
/// Listing and creating organizations is SuperAdmin-only. Creating an
/// organization also provisions its first Admin account with a generated
/// temporary password, returned exactly once in the response. Members may
/// read and Admins may rebrand their own organization.
///
/// # Endpoints
///
/// - `GET /v1/organizations` - List all organizations (SuperAdmin)
/// - `POST /v1/organizations` - Create organization + admin (SuperAdmin)
/// - `GET /v1/organizations/:id` - Get one organization
/// - `PATCH /v1/organizations/:id` - Update name, logo, or theme

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::resolve_context,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskflow_shared::{
    auth::{jwt::Claims, password, permissions::Capability},
    models::{
        organization::{CreateOrganization, Organization, Theme, UpdateOrganization},
        user::{CreateUser, Role, User},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create organization request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    /// Organization display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Unique subdomain
    #[validate(length(min = 1, max = 100, message = "Subdomain must be 1-100 characters"))]
    pub subdomain: String,

    /// Logo as a data URL
    #[serde(default)]
    pub logo: String,

    /// Theme colors; defaults to the standard palette
    #[serde(default)]
    pub theme: Theme,

    /// Display name for the provisioned admin
    #[validate(length(min = 1, max = 255, message = "Admin name must be 1-255 characters"))]
    pub admin_name: String,

    /// Email for the provisioned admin
    #[validate(email(message = "Invalid admin email format"))]
    pub admin_email: String,
}

/// Create organization response
///
/// The temporary password appears here and nowhere else; only its hash is
/// stored.
#[derive(Debug, Serialize)]
pub struct CreateOrganizationResponse {
    pub organization: Organization,
    pub admin: ProvisionedAdmin,
}

/// Credentials for the admin account provisioned with a new organization
#[derive(Debug, Serialize)]
pub struct ProvisionedAdmin {
    pub email: String,
    pub temp_password: String,
}

/// Lists all organizations (SuperAdmin only)
pub async fn list_organizations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<Organization>>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewOrganizations)?;

    let orgs = Organization::list(&state.db).await?;
    Ok(Json(orgs))
}

/// Creates an organization and provisions its first Admin (SuperAdmin only)
///
/// # Errors
///
/// - `409 Conflict`: Subdomain or admin email already taken
pub async fn create_organization(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateOrganizationRequest>,
) -> ApiResult<Json<CreateOrganizationResponse>> {
    let ctx = resolve_context(&state, &claims).await?;
    ctx.authorize(Capability::ViewOrganizations)?;
    req.validate()?;

    let temp_password = password::generate_temp_password();
    let password_hash = password::hash_password(&temp_password)?;

    // The tenant row and its first Admin land together or not at all; a
    // taken admin email must not leave an admin-less organization behind.
    let mut tx = state.db.begin().await?;

    let organization = Organization::create(
        &mut *tx,
        CreateOrganization {
            name: req.name,
            subdomain: req.subdomain,
            logo: req.logo,
            theme: req.theme,
        },
    )
    .await?;

    let admin = User::create(
        &mut *tx,
        CreateUser {
            organization_id: Some(organization.id),
            name: req.admin_name,
            email: req.admin_email,
            password_hash,
            role: Role::Admin,
            avatar: String::new(),
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        organization_id = %organization.id,
        admin_id = %admin.id,
        "organization created with provisioned admin"
    );

    Ok(Json(CreateOrganizationResponse {
        organization,
        admin: ProvisionedAdmin {
            email: admin.email,
            temp_password,
        },
    }))
}

/// Gets one organization
///
/// Members may read their own organization (for branding); anything else
/// requires the SuperAdmin capability.
pub async fn get_organization(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Organization>> {
    let ctx = resolve_context(&state, &claims).await?;

    if ctx.scope() != Some(id) {
        ctx.authorize(Capability::ViewOrganizations)?;
    }

    let org = Organization::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organization not found".to_string()))?;

    Ok(Json(org))
}

/// Updates an organization's name, logo, or theme
///
/// SuperAdmin may update any organization; an Admin only their own.
pub async fn update_organization(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrganization>,
) -> ApiResult<Json<Organization>> {
    let ctx = resolve_context(&state, &claims).await?;

    match ctx.user.role {
        Role::SuperAdmin => {}
        Role::Admin => ctx.check_same_org(id)?,
        _ => {
            return Err(ApiError::Forbidden(
                "Only administrators may update an organization".to_string(),
            ))
        }
    }

    let org = Organization::update(&state.db, id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organization not found".to_string()))?;

    Ok(Json(org))
}
