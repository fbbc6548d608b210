/// API route handlers
///
/// Each module owns one section of the `/v1` surface. Handlers share the
/// same shape: resolve the token claims into a request context, authorize
/// the capability the endpoint needs, then run the operation scoped to the
/// caller's organization.

pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod health;
pub mod organizations;
pub mod projects;
pub mod stories;
pub mod tasks;
pub mod team;

use crate::{app::AppState, error::ApiResult};
use taskflow_shared::auth::context::RequestContext;
use taskflow_shared::auth::jwt::Claims;

/// Resolves validated token claims into a full request context
///
/// Shared by every protected handler. The token is already validated by the
/// auth middleware; this re-checks that the user still exists, is active,
/// and belongs to a real organization.
pub(crate) async fn resolve_context(
    state: &AppState,
    claims: &Claims,
) -> ApiResult<RequestContext> {
    Ok(RequestContext::resolve(&state.db, claims).await?)
}
