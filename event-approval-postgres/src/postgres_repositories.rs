use sqlx::PgPool;
use std::error::Error;
use std::sync::Arc;

use crate::executor::Executor;
use crate::repository::{
    EventHistoryRepositoryImpl, EventRequestRepositoryImpl, VenueRepositoryImpl,
};

/// Entry point for building repositories over a connection pool.
#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Create all repositories sharing a single, freshly started transaction
    pub async fn create_all_repositories(&self) -> Result<ApprovalRepositories, sqlx::Error> {
        let executor = Executor::begin(&self.pool).await?;
        Ok(ApprovalRepositories::new(executor))
    }
}

/// Every repository of one transaction. Dropped without [`ApprovalRepositories::commit`],
/// the transaction rolls back.
pub struct ApprovalRepositories {
    executor: Executor,
    pub event_request_repository: Arc<EventRequestRepositoryImpl>,
    pub event_history_repository: Arc<EventHistoryRepositoryImpl>,
    pub venue_repository: Arc<VenueRepositoryImpl>,
}

impl ApprovalRepositories {
    pub fn new(executor: Executor) -> Self {
        Self {
            event_request_repository: Arc::new(EventRequestRepositoryImpl::new(executor.clone())),
            event_history_repository: Arc::new(EventHistoryRepositoryImpl::new(executor.clone())),
            venue_repository: Arc::new(VenueRepositoryImpl::new(executor.clone())),
            executor,
        }
    }

    pub async fn commit(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.executor.commit().await
    }
}
