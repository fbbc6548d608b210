/// Identity and authorization for TaskFlow
///
/// # Modules
///
/// - `jwt`: Server-issued HS256 access tokens. Identity is never read from
///   bare client headers; the token is the only identity carrier.
/// - `password`: Argon2 password hashing and verification
/// - `permissions`: The role × capability permission evaluator
/// - `context`: `RequestContext` — the per-request (user, organization)
///   pair and the tenancy chokepoint

pub mod context;
pub mod jwt;
pub mod password;
pub mod permissions;
