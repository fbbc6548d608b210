/// Authentication endpoints
///
/// Login is the only public endpoint besides the health check. A successful
/// login issues a signed access token carrying the user's id, display name,
/// role, and organization; every other endpoint derives its identity from
/// that token alone.
///
/// # Endpoints
///
/// - `POST /v1/auth/login` - Login and get an access token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskflow_shared::{
    auth::{jwt, password},
    models::{organization::Organization, user::User},
};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (24h)
    pub token: String,

    /// The authenticated user (password hash never serialized)
    pub user: User,

    /// The user's organization; absent for SuperAdmin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials or deactivated account
/// - `404 Not Found`: The user's organization no longer exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    // Same message for unknown email and wrong password
    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthenticated(
            "Invalid email or password".to_string(),
        ));
    }

    if !user.is_active {
        return Err(ApiError::Unauthenticated(
            "Account is deactivated".to_string(),
        ));
    }

    let organization = match user.organization_id {
        Some(org_id) => Some(
            Organization::find_by_id(&state.db, org_id)
                .await?
                .ok_or_else(|| {
                    ApiError::UnknownOrganization(format!("Unknown organization: {}", org_id))
                })?,
        ),
        None => None,
    };

    User::update_last_login(&state.db, user.id).await?;

    let claims = jwt::Claims::new(user.id, user.name.clone(), user.role, user.organization_id);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "user logged in");

    Ok(Json(LoginResponse {
        token,
        user,
        organization,
    }))
}
