/// Schema bootstrap
///
/// Taskboard has no versioned migrations. On startup [`ensure_schema`] runs a
/// fixed list of `CREATE ... IF NOT EXISTS` statements, so running it against
/// an existing database is a no-op.
///
/// There are no foreign keys between tables: a task may name a project id
/// that does not exist, and assignments may name unknown users or tasks.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::db::schema::ensure_schema;
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = create_pool(DatabaseConfig::with_url("postgresql://localhost/taskboard")).await?;
/// ensure_schema(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, info};

/// Statements applied in order by [`ensure_schema`]
///
/// `gen_random_uuid()` is built into PostgreSQL 13 and later.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        deleted_at TIMESTAMPTZ,
        last_login TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS users_active_email_idx
        ON users (lower(email))
        WHERE deleted_at IS NULL
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'active'
            CHECK (status IN ('active', 'completed')),
        created_by UUID NOT NULL,
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS projects_created_by_idx ON projects (created_by)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'todo'
            CHECK (status IN ('todo', 'in-progress', 'completed')),
        project_id UUID NOT NULL,
        created_by UUID NOT NULL,
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS tasks_project_id_idx ON tasks (project_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assignments (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL,
        task_id UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS assignments_user_id_idx ON assignments (user_id)
    "#,
];

/// Creates any missing tables and indexes
///
/// Statements run one at a time outside a transaction; a failure part-way
/// leaves the earlier ones applied, and the next run picks up the rest.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!(statements = SCHEMA_STATEMENTS.len(), "Ensuring database schema");

    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema ready");
    Ok(())
}

/// Creates the database named in `database_url` if it does not exist
///
/// Used by the seed binary and integration tests; the server expects the
/// database to exist already.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        debug!("Database already exists");
        return Ok(());
    }

    info!("Database does not exist, creating it");
    Postgres::create_database(database_url).await
}
