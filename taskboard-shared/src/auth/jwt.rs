/// JWT token generation and validation module
///
/// Tokens are signed using HS256 (HMAC-SHA256) and carry the user id plus a
/// `role` claim. Only tokens whose role is [`USER_ROLE`] are accepted by the
/// API's bearer check.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: Configurable via `JWT_EXPIRES_IN_HOURS` (default 24 hours)
/// - **Validation**: Signature, expiration and issuer checks
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
///
/// let claims = Claims::for_user(user_id, Duration::hours(24));
/// let token = create_token(&claims, "your-secret-key")?;
///
/// let validated = validate_token(&token, "your-secret-key")?;
/// assert_eq!(validated.id, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer stamped on every token
pub const ISSUER: &str = "taskboard";

/// The only role the API issues and accepts
pub const USER_ROLE: &str = "user";

/// Error type for JWT operations
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

    /// Token is valid but was not issued for a regular user
    #[error("Unexpected role: {0}")]
    InvalidRole(String),
}

/// JWT claims structure
///
/// # Claims
///
/// - `id`: User ID
/// - `role`: Always `"user"` for tokens issued by login
/// - `iss`: Issuer (always "taskboard")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: Uuid,

    /// Role of the bearer
    pub role: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates user claims expiring `expires_in` from now
    pub fn for_user(user_id: Uuid, expires_in: Duration) -> Self {
        Self::with_role(user_id, USER_ROLE, expires_in)
    }

    /// Creates claims with an arbitrary role
    ///
    /// Tokens with a role other than `"user"` are rejected by
    /// [`validate_user_token`]; this exists for callers that mint tokens for
    /// other audiences.
    pub fn with_role(user_id: Uuid, role: impl Into<String>, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            id: user_id,
            role: role.into(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a JWT token from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies signature, expiration and issuer. The role is not checked here;
/// see [`validate_user_token`].
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

/// Validates a token and requires the `"user"` role
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{create_token, validate_user_token, Claims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::with_role(Uuid::new_v4(), "admin", Duration::hours(1));
/// let token = create_token(&claims, "secret")?;
///
/// assert!(validate_user_token(&token, "secret").is_err());
/// # Ok(())
/// # }
/// ```
pub fn validate_user_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.role != USER_ROLE {
        return Err(JwtError::InvalidRole(claims.role));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_for_user() {
        let user_id = Uuid::new_v4();
        let claims = Claims::for_user(user_id, Duration::hours(24));

        assert_eq!(claims.id, user_id);
        assert_eq!(claims.role, "user");
        assert_eq!(claims.iss, "taskboard");
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_create_and_validate_token() {
        let user_id = Uuid::new_v4();
        let claims = Claims::for_user(user_id, Duration::hours(1));
        let token = create_token(&claims, SECRET).expect("Should create token");

        let validated = validate_user_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.id, user_id);
        assert_eq!(validated.role, USER_ROLE);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::for_user(Uuid::new_v4(), Duration::hours(1));
        let token = create_token(&claims, "secret1").expect("Should create token");

        let result = validate_token(&token, "wrong-secret");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::for_user(Uuid::new_v4(), Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = validate_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_non_user_role_rejected() {
        let claims = Claims::with_role(Uuid::new_v4(), "admin", Duration::hours(1));
        let token = create_token(&claims, SECRET).unwrap();

        // Signature is fine, so the generic validation passes
        assert!(validate_token(&token, SECRET).is_ok());

        match validate_user_token(&token, SECRET) {
            Err(JwtError::InvalidRole(role)) => assert_eq!(role, "admin"),
            other => panic!("expected InvalidRole, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(validate_user_token("not-a-jwt", SECRET).is_err());
        assert!(validate_user_token("", SECRET).is_err());
    }
}
