/// Database utilities
///
/// - `pool`: PostgreSQL connection pool management
/// - `migrations`: sqlx migration runner
/// - `bootstrap`: first-run provisioning (SuperAdmin account)

pub mod bootstrap;
pub mod migrations;
pub mod pool;
