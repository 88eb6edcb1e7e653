/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength checks
/// - [`jwt`]: JWT creation and validation (`{id, role}` claims)
/// - [`middleware`]: Bearer header parsing and active-user resolution
/// - [`authorization`]: The ownership predicate used by every write operation
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::password::{hash_password, verify_password};
/// use taskboard_shared::auth::jwt::{create_token, validate_user_token, Claims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Test@123")?;
/// assert!(verify_password("Test@123", &hash)?);
///
/// let claims = Claims::for_user(Uuid::new_v4(), Duration::hours(24));
/// let token = create_token(&claims, "secret")?;
/// let validated = validate_user_token(&token, "secret")?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
