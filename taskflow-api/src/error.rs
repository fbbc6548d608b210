/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to an HTTP
/// status plus a `{error, message, details?}` JSON body. Each domain
/// failure keeps its own error code on the wire; the taxonomy is never
/// collapsed into a generic 500.
///
/// # Status mapping
///
/// | Failure                 | Status | `error`                |
/// |-------------------------|--------|------------------------|
/// | Unauthenticated         | 401    | `unauthenticated`      |
/// | Forbidden               | 403    | `forbidden`            |
/// | Cross-tenant access     | 403    | `cross_tenant_access`  |
/// | Unknown organization    | 404    | `unknown_organization` |
/// | Not found               | 404    | `not_found`            |
/// | Conflict                | 409    | `conflict`             |
/// | Validation              | 422    | `validation_error`     |
/// | Bad request             | 400    | `bad_request`          |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskflow_shared::auth::jwt::JwtError;
use taskflow_shared::auth::password::PasswordError;
use taskflow_shared::error::DomainError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthenticated (401)
    Unauthenticated(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Forbidden: resource belongs to another organization (403)
    CrossTenantAccess,

    /// Not found (404)
    NotFound(String),

    /// The claimed organization does not exist (404)
    UnknownOrganization(String),

    /// Conflict (409) - e.g., duplicate email or subdomain
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    Validation {
        message: String,
        details: Option<Vec<ValidationErrorDetail>>,
    },

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "unauthenticated", "cross_tenant_access")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::CrossTenantAccess => {
                write!(f, "Resource belongs to a different organization")
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::UnknownOrganization(msg) => write!(f, "Unknown organization: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Validation { message, .. } => write!(f, "Validation failed: {}", message),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthenticated", msg, None)
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::CrossTenantAccess => (
                StatusCode::FORBIDDEN,
                "cross_tenant_access",
                "Resource belongs to a different organization".to_string(),
                None,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::UnknownOrganization(msg) => {
                (StatusCode::NOT_FOUND, "unknown_organization", msg, None)
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                details,
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert domain errors to API errors
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthenticated => {
                ApiError::Unauthenticated("Request is not authenticated".to_string())
            }
            DomainError::Forbidden { role, capability } => ApiError::Forbidden(format!(
                "Role {} is not permitted capability {}",
                role.as_str(),
                capability.as_str()
            )),
            DomainError::UnknownOrganization(id) => {
                ApiError::UnknownOrganization(format!("Unknown organization: {}", id))
            }
            DomainError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            DomainError::Validation(msg) => ApiError::Validation {
                message: msg,
                details: None,
            },
            DomainError::UnknownCapability(name) => {
                ApiError::BadRequest(format!("Unknown capability: {}", name))
            }
            DomainError::CrossTenantAccess => ApiError::CrossTenantAccess,
            DomainError::Database(e) => e.into(),
        }
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Surface unique-constraint violations as conflicts
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already exists".to_string());
                    }
                    if constraint.contains("subdomain") {
                        return ApiError::Conflict("Subdomain already taken".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert token errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthenticated("Token expired".to_string()),
            JwtError::ValidationError(_) => {
                ApiError::Unauthenticated("Invalid token".to_string())
            }
            JwtError::CreateError(msg) => {
                ApiError::InternalError(format!("Failed to create token: {}", msg))
            }
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert validator errors to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationErrorDetail> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::Validation {
            message: "Request validation failed".to_string(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow_shared::auth::permissions::Capability;
    use taskflow_shared::models::user::Role;
    use uuid::Uuid;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");
    }

    #[test]
    fn test_forbidden_maps_role_and_capability() {
        let err: ApiError = DomainError::Forbidden {
            role: Role::Ops,
            capability: Capability::ViewProjects,
        }
        .into();

        match err {
            ApiError::Forbidden(msg) => {
                assert!(msg.contains("Ops"));
                assert!(msg.contains("view_projects"));
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_domain_error_mapping() {
        assert!(matches!(
            ApiError::from(DomainError::Unauthenticated),
            ApiError::Unauthenticated(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::CrossTenantAccess),
            ApiError::CrossTenantAccess
        ));
        assert!(matches!(
            ApiError::from(DomainError::UnknownOrganization(Uuid::new_v4())),
            ApiError::UnknownOrganization(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::Validation("bad".to_string())),
            ApiError::Validation { .. }
        ));
    }
}
