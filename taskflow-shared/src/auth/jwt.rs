/// Access token generation and validation
///
/// Identity was carried as plain client-supplied headers in earlier versions
/// of this system; that scheme trusts the client completely and is replaced
/// here with server-issued HS256 tokens. The token is the only identity
/// carrier — nothing downstream reads identity from request headers.
///
/// # Claims
///
/// - `sub`: user ID
/// - `name`: user display name (used as the actor on status events)
/// - `role`: fixed user role
/// - `org_id`: organization context; None only for SuperAdmin
/// - `iss`/`iat`/`exp`/`nbf`: standard claims, issuer is always "taskflow"
///
/// # Example
///
/// ```
/// use taskflow_shared::auth::jwt::{create_token, validate_token, Claims};
/// use taskflow_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(Uuid::new_v4(), "Dana".to_string(), Role::Developer, Some(Uuid::new_v4()));
/// let token = create_token(&claims, "a-secret-at-least-32-bytes-long!!")?;
/// let validated = validate_token(&token, "a-secret-at-least-32-bytes-long!!")?;
/// assert_eq!(validated.sub, claims.sub);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

/// Issuer string embedded in every token
const ISSUER: &str = "taskflow";

/// Access token lifetime
const ACCESS_TOKEN_HOURS: i64 = 24;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — user ID
    pub sub: Uuid,

    /// User display name
    pub name: String,

    /// Fixed user role
    pub role: Role,

    /// Organization context; None only for SuperAdmin
    pub org_id: Option<Uuid>,

    /// Issuer — always "taskflow"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates claims for an access token with the default 24h expiration
    pub fn new(user_id: Uuid, name: String, role: Role, org_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(ACCESS_TOKEN_HOURS);

        Self {
            sub: user_id,
            name,
            role,
            org_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into a token string (HS256)
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Validates a token and returns its claims
///
/// Checks signature, expiration, not-before, and issuer.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_nbf = true;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(e.to_string()),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_create_and_validate_token() {
        let user_id = Uuid::new_v4();
        let org_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "Dana".to_string(), Role::Developer, Some(org_id));

        let token = create_token(&claims, SECRET).unwrap();
        let validated = validate_token(&token, SECRET).unwrap();

        assert_eq!(validated.sub, user_id);
        assert_eq!(validated.name, "Dana");
        assert_eq!(validated.role, Role::Developer);
        assert_eq!(validated.org_id, Some(org_id));
        assert_eq!(validated.iss, "taskflow");
        assert!(!validated.is_expired());
    }

    #[test]
    fn test_super_admin_token_has_no_org() {
        let claims = Claims::new(Uuid::new_v4(), "Root".to_string(), Role::SuperAdmin, None);
        let token = create_token(&claims, SECRET).unwrap();
        let validated = validate_token(&token, SECRET).unwrap();
        assert_eq!(validated.org_id, None);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "Dana".to_string(), Role::Admin, None);
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, "another-secret-also-32-bytes-long!!");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(validate_token("not-a-token", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
    }
}
