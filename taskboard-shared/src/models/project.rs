/// Project model and database operations
///
/// Projects are owned by the user who created them (`created_by`, never
/// changed afterwards) and are soft-deleted through `is_deleted`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     status TEXT NOT NULL DEFAULT 'active'
///         CHECK (status IN ('active', 'completed')),
///     created_by UUID NOT NULL,
///     is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

use super::UnknownStatus;
use crate::auth::authorization::Owned;

pub(crate) const PROJECT_COLUMNS: &str =
    "id, title, description, status, created_by, is_deleted, created_at, updated_at";

/// Project lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Work is ongoing
    #[default]
    Active,

    /// Project is finished
    Completed,
}

impl ProjectStatus {
    /// Database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            _ => Err(UnknownStatus(value)),
        }
    }
}

/// Project record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Description
    pub description: String,

    /// Lifecycle status
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,

    /// Owning user
    pub created_by: Uuid,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

impl Owned for Project {
    fn owner_id(&self) -> Uuid {
        self.created_by
    }
}

/// Input for creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub created_by: Uuid,
}

/// Partial update for a project
///
/// Only `Some` fields are written. There is no way to change `created_by`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl UpdateProject {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

impl Project {
    /// Creates a project with status `active`
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO projects (title, description, created_by)
            VALUES ($1, $2, $3)
            RETURNING {PROJECT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(data.title)
            .bind(data.description)
            .bind(data.created_by)
            .fetch_one(pool)
            .await
    }

    /// Finds a project by ID, soft-deleted or not
    ///
    /// Used for the ownership check that precedes update and delete.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");

        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Applies a partial update
    ///
    /// Returns the updated project, or None if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE projects SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {PROJECT_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Project>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status.as_str());
        }

        q.fetch_optional(pool).await
    }

    /// Sets the soft-delete flag
    ///
    /// Tasks of the project are left untouched.
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET is_deleted = TRUE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(
            ProjectStatus::try_from("completed".to_string()).unwrap(),
            ProjectStatus::Completed
        );
        assert!(ProjectStatus::try_from("done".to_string()).is_err());
        assert_eq!(ProjectStatus::default(), ProjectStatus::Active);
    }

    #[test]
    fn test_status_serde() {
        let status: ProjectStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, ProjectStatus::Completed);
        assert_eq!(serde_json::to_string(&ProjectStatus::Active).unwrap(), "\"active\"");
        assert!(serde_json::from_str::<ProjectStatus>("\"Active\"").is_err());
    }

    #[test]
    fn test_update_project_is_empty() {
        assert!(UpdateProject::default().is_empty());

        let update = UpdateProject {
            status: Some(ProjectStatus::Completed),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
