//! Test helper module for transaction-based test isolation
//!
//! Repository tests run inside a transaction that is rolled back when the
//! context is dropped, so they need no cleanup of their own.

use crate::config::PostgresConfig;
use crate::postgres_repositories::{ApprovalRepositories, PostgresRepositories};
use crate::repository::db_init::init_database;
use crate::store::PgApprovalStore;
use std::sync::Arc;

/// Transactional database session for one test
pub struct TestContext {
    pub repos: ApprovalRepositories,
}

impl TestContext {
    pub fn repos(&self) -> &ApprovalRepositories {
        &self.repos
    }
}

/// Setup a test context with a transactional database session
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let venue_repo = &ctx.repos().venue_repository;
///
///     // All changes are rolled back when ctx is dropped
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let config = PostgresConfig {
        max_connections: 1,
        ..PostgresConfig::from_env()?
    };
    let pool = config.connect().await?;
    init_database(&pool).await?;

    let repos = PostgresRepositories::new(Arc::new(pool))
        .create_all_repositories()
        .await?;
    Ok(TestContext { repos })
}

/// Setup a store whose writes are committed
///
/// Engine-level tests need several transactions at once, so the pool has at least two
/// connections. Every test works on freshly generated ids and leaves its rows behind.
pub async fn setup_test_store() -> Result<PgApprovalStore, Box<dyn std::error::Error + Send + Sync>> {
    let mut config = PostgresConfig::from_env()?;
    config.max_connections = config.max_connections.max(2);
    let pool = config.connect().await?;
    init_database(&pool).await?;
    Ok(PgApprovalStore::new(Arc::new(pool), &config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_utils::test_utils::create_test_venue;
    use event_approval_db::repository::create_batch::CreateBatch;
    use event_approval_db::repository::load_batch::LoadBatch;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_context_rolls_back_on_drop() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let venue = create_test_venue("Rollback Hall");
        {
            let ctx = setup_test_context().await?;
            ctx.repos().venue_repository.create_batch(vec![venue.clone()]).await?;
            let loaded = ctx.repos().venue_repository.load_batch(&[venue.id]).await?;
            assert_eq!(loaded, vec![Some(venue.clone())]);
        }

        let ctx = setup_test_context().await?;
        let loaded = ctx.repos().venue_repository.load_batch(&[venue.id]).await?;
        assert_eq!(loaded, vec![None]);
        Ok(())
    }
}
