/// Domain error taxonomy
///
/// Every failure in the access-control and task-lifecycle model is one of
/// these variants. They are surfaced to callers as distinct, mapped failures
/// (the API layer assigns each its own HTTP status and error code) and are
/// never collapsed into a generic error. None of them is retried here;
/// retries, if any, belong to the transport layer.

use uuid::Uuid;

use crate::auth::permissions::Capability;
use crate::models::user::Role;

/// Errors produced by identity resolution, authorization, and model operations
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// No identity could be established for the request
    #[error("Request is not authenticated")]
    Unauthenticated,

    /// The caller's role is not permitted the capability
    #[error("Role {role:?} is not permitted capability {capability:?}")]
    Forbidden { role: Role, capability: Capability },

    /// The claimed organization id does not resolve to an organization
    #[error("Unknown organization: {0}")]
    UnknownOrganization(Uuid),

    /// A named resource does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Malformed input: bad enum value, missing required field
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A capability name outside the enumerated set
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    /// The resource belongs to a different organization than the caller's
    #[error("Resource belongs to a different organization")]
    CrossTenantAccess,

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::NotFound("Task");
        assert_eq!(err.to_string(), "Task not found");

        let err = DomainError::UnknownCapability("fly_to_moon".to_string());
        assert_eq!(err.to_string(), "Unknown capability: fly_to_moon");

        let err = DomainError::CrossTenantAccess;
        assert!(err.to_string().contains("different organization"));
    }

    #[test]
    fn test_forbidden_names_role_and_capability() {
        let err = DomainError::Forbidden {
            role: Role::Ops,
            capability: Capability::ViewProjects,
        };
        let msg = err.to_string();
        assert!(msg.contains("Ops"));
        assert!(msg.contains("ViewProjects"));
    }
}
