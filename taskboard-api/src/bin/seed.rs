//! # Taskboard seed tool
//!
//! Creates the schema if needed and inserts development data.
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskboard cargo run -p taskboard-api --bin taskboard-seed
//! ```

use anyhow::Context;
use taskboard_api::{seed, telemetry};
use taskboard_shared::db::{
    pool::{close_pool, create_pool, DatabaseConfig},
    schema::{ensure_database_exists, ensure_schema},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

    ensure_database_exists(&database_url).await?;

    let pool = create_pool(DatabaseConfig {
        max_connections: 2,
        ..DatabaseConfig::with_url(database_url)
    })
    .await?;

    ensure_schema(&pool).await?;

    let result = seed::run(&pool).await;
    close_pool(pool).await;

    let summary = result?;
    tracing::info!(
        admin_id = %summary.admin_id,
        user_id = %summary.user_id,
        "Seed complete"
    );

    Ok(())
}
