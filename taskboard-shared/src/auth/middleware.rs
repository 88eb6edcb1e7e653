/// Bearer-token authentication
///
/// [`authenticate`] turns the raw `Authorization` header into the active
/// [`User`] it belongs to:
///
/// 1. the header must be present and carry a `Bearer <token>` value;
/// 2. the token must verify against the shared secret and not be expired;
/// 3. its `role` claim must be `"user"`;
/// 4. the `id` claim must name a user whose `deleted_at` is NULL.
///
/// Each step has its own [`AuthError`] variant for logging, but callers are
/// expected to collapse all of them into a single 401 response.
///
/// After a successful check the API inserts a [`CurrentUser`] into the request
/// extensions. Handlers take it as an extractor:
///
/// ```
/// use taskboard_shared::auth::middleware::CurrentUser;
///
/// async fn handler(user: CurrentUser) -> String {
///     format!("Hello, {}!", user.email)
/// }
/// ```

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use super::jwt::{validate_user_token, JwtError};
use crate::models::user::User;

/// Message returned for every authentication failure
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed.";

/// The authenticated user attached to a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Error type for bearer authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header, or no token in it
    #[error("Missing credentials")]
    MissingCredentials,

    /// Token failed signature, expiry or role checks
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),

    /// Token names a user that does not exist or was deleted
    #[error("User {0} not found or deleted")]
    UnknownUser(Uuid),

    /// Database error during the user lookup
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "Rejecting unauthenticated request");

        let status = StatusCode::UNAUTHORIZED;
        let body = Json(json!({
            "success": false,
            "statusCode": status.as_u16(),
            "message": AUTH_FAILED_MESSAGE,
        }));

        (status, body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}

/// Extracts the token from an `Authorization` header value
///
/// The scheme is matched case-insensitively; surrounding whitespace is
/// ignored. Returns None for any other scheme or an empty token.
pub fn extract_bearer(header: &str) -> Option<&str> {
    let header = header.trim();
    let (scheme, token) = header.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Resolves an `Authorization` header to the active user
///
/// # Errors
///
/// See the module documentation for the checks performed.
pub async fn authenticate(
    pool: &PgPool,
    secret: &str,
    header: Option<&str>,
) -> Result<User, AuthError> {
    let token = header
        .and_then(extract_bearer)
        .ok_or(AuthError::MissingCredentials)?;

    let claims = validate_user_token(token, secret)?;

    User::find_active_by_id(pool, claims.id)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
        .ok_or(AuthError::UnknownUser(claims.id))
}
