/// "My projects": non-deleted projects that contain a task assigned to the caller
///
/// The project set comes from every task the caller is assigned to, whether
/// or not that task has since been soft-deleted. Only the project's own
/// deletion flag hides it.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::{like_pattern, ListQuery, Paginated};
use crate::models::project::{Project, PROJECT_COLUMNS};

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, user_id: Uuid, query: &ListQuery) {
    qb.push(
        " FROM projects p \
         WHERE p.is_deleted = FALSE \
         AND p.id IN (\
         SELECT t.project_id FROM assignments a \
         JOIN tasks t ON t.id = a.task_id \
         WHERE a.user_id = ",
    );
    qb.push_bind(user_id);
    qb.push(")");

    if !query.search.is_empty() {
        let pattern = like_pattern(&query.search);
        qb.push(" AND (p.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR p.description ILIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\')");
    }

    if !query.status.is_empty() {
        qb.push(" AND p.status ILIKE ");
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
    let mut qb = QueryBuilder::new(format!("SELECT {PROJECT_COLUMNS}"));
    push_filters(&mut qb, user_id, query);
    qb.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ");
    qb.push_bind(query.limit);
    qb.push(" OFFSET ");
    qb.push_bind(query.offset());
    qb
}

/// Lists one page of projects the caller has assigned work in, newest first
pub async fn get_my_projects(
    pool: &PgPool,
    user_id: Uuid,
    query: &ListQuery,
) -> Result<Paginated<Project>, sqlx::Error> {
    let (total,): (i64,) = count_query(user_id, query)
        .build_query_as()
        .fetch_one(pool)
        .await?;

    let data = if total > query.offset() {
        page_query(user_id, query)
            .build_query_as::<Project>()
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
        "Listed projects with assigned work"
    );

    Ok(Paginated::new(data, total, query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deletion_is_not_filtered() {
        let qb = count_query(Uuid::new_v4(), &ListQuery::default());
        let sql = qb.sql();

        assert!(sql.contains("p.is_deleted = FALSE"));
        assert!(!sql.contains("t.is_deleted"));
        assert!(sql.contains("WHERE a.user_id = $1)"));
    }

    #[test]
    fn test_page_query_orders_newest_first() {
        let query = ListQuery {
            search: "alpha".to_string(),
            ..Default::default()
        };
        let qb = page_query(Uuid::new_v4(), &query);
        let sql = qb.sql();

        assert!(sql.starts_with("SELECT id, title"));
        assert!(sql.contains("(p.title ILIKE $2 ESCAPE '\\' OR p.description ILIKE $3 ESCAPE '\\')"));
        assert!(sql.ends_with("ORDER BY p.created_at DESC, p.id DESC LIMIT $4 OFFSET $5"));
    }
}
