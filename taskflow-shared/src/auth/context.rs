/// Request context: the resolved (user, organization) pair
///
/// Every operation receives a `RequestContext` explicitly — there is no
/// ambient user or organization state anywhere in the system. The context is
/// also the single chokepoint for tenancy: handlers take their organization
/// scope from [`RequestContext::scope`] and mutations verify resource
/// ownership with [`RequestContext::check_same_org`] rather than building
/// their own filters.
///
/// # Resolution
///
/// [`RequestContext::resolve`] turns validated token claims into a typed
/// context:
///
/// - the user must exist and be active, else `Unauthenticated`
/// - a claimed organization id that does not resolve fails with
///   `UnknownOrganization`
/// - a missing organization claim is accepted only for SuperAdmin, the one
///   role that operates across tenants

use sqlx::PgPool;
use uuid::Uuid;

use super::jwt::Claims;
use super::permissions::{allowed, Capability};
use crate::error::{DomainError, DomainResult};
use crate::models::organization::Organization;
use crate::models::user::{Role, User};

/// Resolved identity for one request
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The acting user
    pub user: User,

    /// The user's organization; None only for SuperAdmin
    pub organization: Option<Organization>,
}

impl RequestContext {
    /// Resolves token claims into a typed context
    pub async fn resolve(pool: &PgPool, claims: &Claims) -> DomainResult<Self> {
        let user = User::find_by_id(pool, claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or(DomainError::Unauthenticated)?;

        let organization = match user.organization_id {
            Some(org_id) => Some(
                Organization::find_by_id(pool, org_id)
                    .await?
                    .ok_or(DomainError::UnknownOrganization(org_id))?,
            ),
            None => {
                if user.role != Role::SuperAdmin {
                    return Err(DomainError::Unauthenticated);
                }
                None
            }
        };

        Ok(Self { user, organization })
    }

    /// Authorizes a capability for the acting user's role
    pub fn authorize(&self, capability: Capability) -> DomainResult<()> {
        if !allowed(self.user.role, capability) {
            return Err(DomainError::Forbidden {
                role: self.user.role,
                capability,
            });
        }

        Ok(())
    }

    /// The organization scope for queries
    ///
    /// None (unscoped) only for SuperAdmin; every other role is always
    /// scoped to its own organization.
    pub fn scope(&self) -> Option<Uuid> {
        self.organization.as_ref().map(|org| org.id)
    }

    /// Rejects resources belonging to another organization
    ///
    /// The unscoped SuperAdmin context passes; every scoped context must
    /// match the resource's organization exactly.
    pub fn check_same_org(&self, resource_org_id: Uuid) -> DomainResult<()> {
        match self.scope() {
            None => Ok(()),
            Some(org_id) if org_id == resource_org_id => Ok(()),
            Some(_) => Err(DomainError::CrossTenantAccess),
        }
    }

    /// Display name of the acting user, recorded as the actor on events
    pub fn actor_name(&self) -> &str {
        &self.user.name
    }

    /// The organization id required for writes that create scoped rows
    ///
    /// SuperAdmin creating tenant-scoped data must name a target
    /// organization some other way; an unscoped create is a validation
    /// error, not a silent global row.
    pub fn require_org(&self) -> DomainResult<Uuid> {
        self.scope().ok_or_else(|| {
            DomainError::Validation("An organization context is required for this operation".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn context(role: Role, org_id: Option<Uuid>) -> RequestContext {
        let organization = org_id.map(|id| Organization {
            id,
            name: "Acme".to_string(),
            subdomain: "acme".to_string(),
            logo: String::new(),
            theme: serde_json::json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });

        RequestContext {
            user: User {
                id: Uuid::new_v4(),
                organization_id: org_id,
                name: "Dana".to_string(),
                email: "dana@example.com".to_string(),
                password_hash: String::new(),
                role,
                avatar: String::new(),
                is_active: true,
                last_login_at: None,
                created_at: Utc::now(),
            },
            organization,
        }
    }

    #[test]
    fn test_authorize_allows_and_denies_per_table() {
        let dev = context(Role::Developer, Some(Uuid::new_v4()));
        assert!(dev.authorize(Capability::UpdateTaskStatus).is_ok());
        assert!(dev.authorize(Capability::ViewTeam).is_err());

        let ops = context(Role::Ops, Some(Uuid::new_v4()));
        let err = ops.authorize(Capability::ViewProjects).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden { .. }));
    }

    #[test]
    fn test_scope_is_none_only_for_super_admin() {
        let root = context(Role::SuperAdmin, None);
        assert_eq!(root.scope(), None);

        let org_id = Uuid::new_v4();
        let admin = context(Role::Admin, Some(org_id));
        assert_eq!(admin.scope(), Some(org_id));
    }

    #[test]
    fn test_check_same_org_rejects_cross_tenant() {
        let org_a = Uuid::new_v4();
        let org_b = Uuid::new_v4();

        let member = context(Role::Developer, Some(org_a));
        assert!(member.check_same_org(org_a).is_ok());
        assert!(matches!(
            member.check_same_org(org_b),
            Err(DomainError::CrossTenantAccess)
        ));

        // Unscoped SuperAdmin passes for any organization
        let root = context(Role::SuperAdmin, None);
        assert!(root.check_same_org(org_a).is_ok());
        assert!(root.check_same_org(org_b).is_ok());
    }

    #[test]
    fn test_require_org_fails_unscoped() {
        let root = context(Role::SuperAdmin, None);
        assert!(matches!(
            root.require_org(),
            Err(DomainError::Validation(_))
        ));

        let org_id = Uuid::new_v4();
        let admin = context(Role::Admin, Some(org_id));
        assert_eq!(admin.require_org().unwrap(), org_id);
    }
}
