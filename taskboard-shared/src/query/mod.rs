/// Read views over the stores: "my tasks" and "my projects"
///
/// Both views take the same [`ListParams`] (search, status, page, limit) and
/// return the same [`Paginated`] envelope. Each view builds its `FROM`/`WHERE`
/// clause in one function that is pushed into both the `COUNT(*)` query and
/// the page query, so the total always describes the rows being paged.
///
/// Search and status are case-insensitive substring matches. LIKE
/// metacharacters in user input are escaped and matched literally. PostgreSQL
/// text cannot hold NUL, so a search or status containing one is rejected
/// before any query is built.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::query::{my_tasks, ListParams};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let params = ListParams {
///     search: Some("report".to_string()),
///     ..Default::default()
/// };
/// let page = my_tasks::get_my_tasks(&pool, user_id, &params.normalized()?).await?;
/// println!("{} of {} tasks", page.data.len(), page.total);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};

pub mod my_projects;
pub mod my_tasks;

/// Page used when the request does not name one
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the request does not name one
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest accepted page size
pub const MAX_LIMIT: i64 = 100;

/// A list parameter that can never match a stored value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must not contain NUL characters")]
pub struct InvalidListParam {
    pub field: &'static str,
}

/// Raw list parameters as they arrive in the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListParams {
    /// Applies defaults and clamps page and limit into range
    ///
    /// # Errors
    ///
    /// Returns [`InvalidListParam`] when `search` or `status` contains `\0`.
    pub fn normalized(&self) -> Result<ListQuery, InvalidListParam> {
        Ok(ListQuery {
            search: text_param("search", self.search.as_deref())?,
            status: text_param("status", self.status.as_deref())?,
            page: self.page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        })
    }
}

fn text_param(field: &'static str, value: Option<&str>) -> Result<String, InvalidListParam> {
    match value {
        Some(value) if value.contains('\0') => Err(InvalidListParam { field }),
        Some(value) => Ok(value.to_string()),
        None => Ok(String::new()),
    }
}

/// Normalized list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Substring of title or description; empty matches everything
    pub search: String,

    /// Substring of the status; empty matches everything
    pub status: String,

    /// 1-based page number
    pub page: i64,

    /// Page size, within `1..=MAX_LIMIT`
    pub limit: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: String::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    /// Rows skipped before the current page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of results plus the totals needed to page through the rest
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub current_page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, query: &ListQuery) -> Self {
        Self {
            data,
            total,
            current_page: query.page,
            limit: query.limit,
            total_pages: total_pages(total, query.limit),
        }
    }
}

/// `ceil(total / limit)`, or 0 when there is nothing to page
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Wraps `input` into a `%...%` ILIKE pattern with `\`, `%` and `_` escaped
pub fn like_pattern(input: &str) -> String {
    let mut pattern = String::with_capacity(input.len() + 2);
    pattern.push('%');
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
