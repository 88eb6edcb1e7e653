/// "My tasks": tasks reachable through the caller's assignments
///
/// ```sql
/// FROM assignments a
/// JOIN tasks t    ON t.id = a.task_id    AND t.is_deleted = FALSE
/// JOIN projects p ON p.id = t.project_id AND p.is_deleted = FALSE
/// WHERE a.user_id = $1
/// ```
///
/// The joins are inner joins, so an assignment whose task or project is
/// missing or soft-deleted produces no row. Each assignment yields its own
/// row; a task assigned twice to the same user is listed twice.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder, Row};
use tracing::debug;
use uuid::Uuid;

use super::{like_pattern, ListQuery, Paginated};
use crate::models::project::{Project, ProjectStatus};
use crate::models::task::Task;

const SELECT_COLUMNS: &str = "SELECT \
    t.id, t.title, t.description, t.status, t.project_id, t.created_by, \
    t.is_deleted, t.created_at, t.updated_at, \
    p.id AS p_id, p.title AS p_title, p.description AS p_description, \
    p.status AS p_status, p.created_by AS p_created_by, p.is_deleted AS p_is_deleted, \
    p.created_at AS p_created_at, p.updated_at AS p_updated_at";

/// A task row together with the project it belongs to
#[derive(Debug, Clone, Serialize)]
pub struct MyTask {
    #[serde(flatten)]
    pub task: Task,

    pub project: Project,
}

impl<'r> FromRow<'r, PgRow> for MyTask {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let task = Task::from_row(row)?;

        let status: String = row.try_get("p_status")?;
        let status = ProjectStatus::try_from(status).map_err(|e| sqlx::Error::ColumnDecode {
            index: "p_status".to_string(),
            source: Box::new(e),
        })?;

        let project = Project {
            id: row.try_get("p_id")?,
            title: row.try_get("p_title")?,
            description: row.try_get("p_description")?,
            status,
            created_by: row.try_get("p_created_by")?,
            is_deleted: row.try_get("p_is_deleted")?,
            created_at: row.try_get::<DateTime<Utc>, _>("p_created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("p_updated_at")?,
        };

        Ok(Self { task, project })
    }
}

/// Pushes the shared `FROM ... WHERE ...` clause
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, user_id: Uuid, query: &ListQuery) {
    qb.push(
        " FROM assignments a \
         JOIN tasks t ON t.id = a.task_id AND t.is_deleted = FALSE \
         JOIN projects p ON p.id = t.project_id AND p.is_deleted = FALSE \
         WHERE a.user_id = ",
    );
    qb.push_bind(user_id);

    if !query.search.is_empty() {
        let pattern = like_pattern(&query.search);
        qb.push(" AND (t.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR t.description ILIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\')");
    }

    if !query.status.is_empty() {
        qb.push(" AND t.status ILIKE ");
        qb.push_bind(like_pattern(&query.status));
        qb.push(" ESCAPE '\\'");
    }
}

fn count_query(user_id: Uuid, query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*)");
    push_filters(&mut qb, user_id, query);
    qb
}

fn page_query(user_id: Uuid, query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_COLUMNS);
    push_filters(&mut qb, user_id, query);
    qb.push(" ORDER BY t.created_at DESC, t.id DESC LIMIT ");
    qb.push_bind(query.limit);
    qb.push(" OFFSET ");
    qb.push_bind(query.offset());
    qb
}

/// Lists one page of the caller's assigned tasks, newest first
pub async fn get_my_tasks(
    pool: &PgPool,
    user_id: Uuid,
    query: &ListQuery,
) -> Result<Paginated<MyTask>, sqlx::Error> {
    let (total,): (i64,) = count_query(user_id, query)
        .build_query_as()
        .fetch_one(pool)
        .await?;

    let data = if total > query.offset() {
        page_query(user_id, query)
            .build_query_as::<MyTask>()
            .fetch_all(pool)
            .await?
    } else {
        Vec::new()
    };

    debug!(
        user_id = %user_id,
        total,
        page = query.page,
        returned = data.len(),
        "Listed assigned tasks"
    );

    Ok(Paginated::new(data, total, query))
}
