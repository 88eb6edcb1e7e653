/// Ownership checks for write operations
///
/// Taskboard has no roles and no shared ownership: the user recorded in an
/// entity's `created_by` is the only one allowed to update it, delete it, or
/// assign it (for tasks). Being assigned to a task grants read visibility
/// through the "my tasks" view, never write access.
///
/// A failed ownership check is indistinguishable from a missing entity, so
/// callers cannot probe for ids they do not own.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::authorization::{can_mutate, Owned};
/// use uuid::Uuid;
///
/// struct Note { author: Uuid }
///
/// impl Owned for Note {
///     fn owner_id(&self) -> Uuid { self.author }
/// }
///
/// let author = Uuid::new_v4();
/// let note = Note { author };
///
/// assert!(can_mutate(&note, author));
/// assert!(!can_mutate(&note, Uuid::new_v4()));
/// ```

use uuid::Uuid;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Entity does not exist or the actor does not own it
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database error while loading the entity
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// An entity with a single owning user
pub trait Owned {
    /// The user allowed to mutate this entity
    fn owner_id(&self) -> Uuid;
}

/// Whether `actor` may update or delete `entity`
pub fn can_mutate<T: Owned + ?Sized>(entity: &T, actor: Uuid) -> bool {
    entity.owner_id() == actor
}

/// Turns a by-id lookup result into an owned entity or `NotFound`
///
/// `kind` names the entity in the error ("Project", "Task").
///
/// # Example
///
/// ```no_run
/// # use taskboard_shared::auth::authorization::{require_owner, AuthzError};
/// # use taskboard_shared::models::project::Project;
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
/// # async fn example(pool: PgPool, id: Uuid, actor: Uuid) -> Result<(), AuthzError> {
/// let project = require_owner(Project::find_by_id(&pool, id).await?, actor, "Project")?;
/// # Ok(())
/// # }
/// ```
pub fn require_owner<T: Owned>(
    entity: Option<T>,
    actor: Uuid,
    kind: &'static str,
) -> Result<T, AuthzError> {
    match entity {
        Some(entity) if can_mutate(&entity, actor) => Ok(entity),
        _ => Err(AuthzError::NotFound(kind)),
    }
}
