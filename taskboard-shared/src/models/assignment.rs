/// Assignment model: user ↔ task links
///
/// Assignments are append-only. Assigning the same task to the same user twice
/// stores two rows, and "my tasks" lists the task once per row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE assignments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL,
///     task_id UUID NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// CREATE INDEX assignments_user_id_idx ON assignments (user_id);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Assignment of a task to a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    /// Records that `user_id` is assigned to `task_id`
    ///
    /// Neither id is checked for existence here.
    pub async fn create(pool: &PgPool, user_id: Uuid, task_id: Uuid) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (user_id, task_id)
            VALUES ($1, $2)
            RETURNING id, user_id, task_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .fetch_one(pool)
        .await
    }
}
