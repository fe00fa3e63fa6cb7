//! Database initialization and cleanup utilities
//!
//! Applies the SQL files under `migrations/` and `cleanup/` of this crate.

use sqlx::PgPool;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Initialize the database by executing migration files in ascending order
///
/// Migrations are idempotent, so this is safe to run on every start.
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use event_approval_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    execute_sql_files_in_order(pool, &migrations_dir, true).await
}

/// Cleanup the database by executing cleanup files in descending order
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use event_approval_postgres::repository::db_init::cleanup_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// cleanup_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn cleanup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let cleanup_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cleanup");
    execute_sql_files_in_order(pool, &cleanup_dir, false).await
}

async fn execute_sql_files_in_order(
    pool: &PgPool,
    dir: &Path,
    ascending: bool,
) -> Result<(), sqlx::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(sqlx::Error::Io)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("sql"))
        .collect();

    entries.sort_by_key(|entry| entry.file_name());
    if !ascending {
        entries.reverse();
    }

    for entry in entries {
        let path = entry.path();
        let sql = fs::read_to_string(&path).map_err(sqlx::Error::Io)?;
        debug!(file = %path.display(), "executing sql file");
        sqlx::raw_sql(&sql).execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PostgresConfig;
    use serial_test::serial;

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_init_is_idempotent_and_cleanup_reverses_it() -> Result<(), Box<dyn std::error::Error>> {
        let pool = PostgresConfig::from_env()?.connect().await?;

        init_database(&pool).await?;
        init_database(&pool).await?;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name IN ('venue', 'event_request', 'event_history')",
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(tables, 3);

        cleanup_database(&pool).await?;
        init_database(&pool).await?;

        Ok(())
    }
}
