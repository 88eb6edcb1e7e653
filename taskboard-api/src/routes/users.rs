/// Account endpoints
///
/// - `POST /users/signup` - Create an account
/// - `POST /users/login` - Exchange credentials for a bearer token
///
/// Both are public. Business-rule failures (password mismatch, duplicate
/// email, unknown email, wrong password) are 400s with a fixed message.

use crate::{
    app::AppState,
    error::{validate, ApiError, ApiResult},
    extract::AppJson,
    response::{ApiResponse, Empty},
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use tracing::info;
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Checked for strength after the shape checks
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, message = "Confirm password is required"))]
    pub confirm_password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response payload
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
}

/// Register a new user
///
/// ```text
/// POST /users/signup
///
/// {
///   "first_name": "Ada",
///   "last_name": "Lovelace",
///   "email": "ada@example.com",
///   "password": "Secret@123",
///   "confirm_password": "Secret@123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, passwords differ, or a live
///   account already uses the email
pub async fn signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignupRequest>,
) -> ApiResult<ApiResponse<Empty>> {
    validate(&req)?;
    password::validate_password_strength(&req.password)
        .map_err(|e| ApiError::field("password", e))?;

    if req.password != req.confirm_password {
        return Err(ApiError::BadRequest(
            "Password and confirm password must be same.".to_string(),
        ));
    }

    if User::find_active_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest(
            "User exists with this email.".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    info!(user_id = %user.id, "User signed up");

    Ok(ApiResponse::message(StatusCode::CREATED, "Signup successful."))
}

/// Log in and receive a bearer token
///
/// ```text
/// POST /users/login
///
/// { "email": "ada@example.com", "password": "Secret@123" }
/// ```
///
/// Response (201):
///
/// ```json
/// { "success": true, "statusCode": 201, "message": "Login successfully.", "token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: No live account with that email, or wrong password
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    validate(&req)?;

    let user = User::find_active_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::BadRequest("User not registered with this email.".to_string()))?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(ApiError::BadRequest("Wrong password entered.".to_string()));
    }

    let claims = jwt::Claims::for_user(user.id, state.config.jwt_expiry());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    User::update_last_login(&state.db, user.id).await?;

    info!(user_id = %user.id, "User logged in");

    Ok(ApiResponse::created(LoginResponse { token }).with_message("Login successfully."))
}
