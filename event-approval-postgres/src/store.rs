use async_trait::async_trait;
use event_approval_api::{ApiResult, ApprovalError, EventRecord, HistoryEntry, Venue};
use event_approval_db::models::event_request::EventRequestModel;
use event_approval_db::models::venue::VenueModel;
use event_approval_db::repository::approval_store::{ApprovalStore, ApprovalUnitOfWork};
use event_approval_db::repository::create_batch::CreateBatch;
use event_approval_db::repository::load_batch::LoadBatch;
use event_approval_db::repository::load_history::LoadHistory;
use event_approval_db::repository::pagination::{Page, PageRequest};
use moka::future::Cache;
use sqlx::PgPool;
use std::error::Error;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::config::PostgresConfig;
use crate::postgres_repositories::{ApprovalRepositories, PostgresRepositories};

/// [`ApprovalStore`] on Postgres.
///
/// Venues are read through a `moka` cache; venues are never deleted, so a cached entry
/// can only go stale on a rename, which booking decisions do not depend on.
#[derive(Clone)]
pub struct PgApprovalStore {
    repositories: PostgresRepositories,
    venue_cache: Cache<Uuid, Venue>,
}

impl PgApprovalStore {
    pub fn new(pool: Arc<PgPool>, config: &PostgresConfig) -> Self {
        let venue_cache = Cache::builder()
            .max_capacity(config.venue_cache_capacity)
            .time_to_live(config.venue_cache_ttl)
            .build();
        Self {
            repositories: PostgresRepositories::new(pool),
            venue_cache,
        }
    }

    pub async fn connect(config: &PostgresConfig) -> Result<Self, sqlx::Error> {
        let pool = config.connect().await?;
        Ok(Self::new(Arc::new(pool), config))
    }

    pub fn repositories(&self) -> &PostgresRepositories {
        &self.repositories
    }

    /// Short-lived transaction for committed-state reads; rolled back on drop.
    async fn read_only(&self) -> ApiResult<ApprovalRepositories> {
        Ok(self.repositories.create_all_repositories().await?)
    }
}

fn to_records(models: Vec<EventRequestModel>) -> ApiResult<Vec<EventRecord>> {
    models.into_iter().map(EventRecord::try_from).collect()
}

#[async_trait]
impl ApprovalStore for PgApprovalStore {
    type UnitOfWork = PgUnitOfWork;

    async fn begin(&self) -> ApiResult<Self::UnitOfWork> {
        Ok(PgUnitOfWork {
            repos: self.repositories.create_all_repositories().await?,
            venue_cache: self.venue_cache.clone(),
        })
    }

    async fn load_event(&self, event_id: Uuid) -> ApiResult<Option<EventRecord>> {
        let repos = self.read_only().await?;
        load_event(&repos, event_id).await
    }

    async fn load_venue(&self, venue_id: Uuid) -> ApiResult<Option<Venue>> {
        if let Some(venue) = self.venue_cache.get(&venue_id).await {
            return Ok(Some(venue));
        }
        let repos = self.read_only().await?;
        let loaded = repos.venue_repository.load_batch(&[venue_id]).await?;
        let venue = loaded.into_iter().next().flatten().map(Venue::from);
        if let Some(venue) = &venue {
            self.venue_cache.insert(venue_id, venue.clone()).await;
        }
        Ok(venue)
    }

    async fn find_active_bookings(
        &self,
        venue_id: Uuid,
        exclude_event_id: Option<Uuid>,
    ) -> ApiResult<Vec<EventRecord>> {
        let repos = self.read_only().await?;
        let models = repos
            .event_request_repository
            .find_active_by_venue(venue_id, exclude_event_id)
            .await?;
        to_records(models)
    }

    async fn load_history(&self, event_id: Uuid) -> ApiResult<Vec<HistoryEntry>> {
        let repos = self.read_only().await?;
        let models = repos.event_history_repository.load_all(event_id).await?;
        Ok(models.into_iter().map(HistoryEntry::from).collect())
    }

    async fn load_history_page(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry>> {
        let repos = self.read_only().await?;
        let page = repos
            .event_history_repository
            .load_history(event_id, page)
            .await?;
        Ok(page.map(HistoryEntry::from))
    }
}

#[async_trait]
impl CreateBatch<Venue> for PgApprovalStore {
    async fn create_batch(
        &self,
        items: Vec<Venue>,
    ) -> Result<Vec<Venue>, Box<dyn Error + Send + Sync>> {
        let models = items
            .iter()
            .map(VenueModel::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let repos = self.repositories.create_all_repositories().await?;
        repos.venue_repository.create_batch(models).await?;
        repos.commit().await?;
        Ok(items)
    }
}

#[async_trait]
impl LoadBatch<Venue> for PgApprovalStore {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<Venue>>, Box<dyn Error + Send + Sync>> {
        let repos = self.repositories.create_all_repositories().await?;
        let loaded = repos.venue_repository.load_batch(ids).await?;
        Ok(loaded
            .into_iter()
            .map(|model| model.map(Venue::from))
            .collect())
    }
}

async fn load_event(repos: &ApprovalRepositories, event_id: Uuid) -> ApiResult<Option<EventRecord>> {
    let loaded = repos
        .event_request_repository
        .load_batch(&[event_id])
        .await?;
    loaded
        .into_iter()
        .next()
        .flatten()
        .map(EventRecord::try_from)
        .transpose()
}

/// One Postgres transaction behind the [`ApprovalUnitOfWork`] contract.
pub struct PgUnitOfWork {
    repos: ApprovalRepositories,
    venue_cache: Cache<Uuid, Venue>,
}

#[async_trait]
impl ApprovalUnitOfWork for PgUnitOfWork {
    async fn load_event(&mut self, event_id: Uuid) -> ApiResult<Option<EventRecord>> {
        load_event(&self.repos, event_id).await
    }

    async fn lock_venue(&mut self, venue_id: Uuid) -> ApiResult<Option<Venue>> {
        let locked = self.repos.venue_repository.lock_for_update(venue_id).await?;
        let venue = locked.map(Venue::from);
        if let Some(venue) = &venue {
            self.venue_cache.insert(venue_id, venue.clone()).await;
        }
        debug!(%venue_id, found = venue.is_some(), "venue row locked");
        Ok(venue)
    }

    async fn find_active_bookings(
        &mut self,
        venue_id: Uuid,
        exclude_event_id: Option<Uuid>,
    ) -> ApiResult<Vec<EventRecord>> {
        let models = self
            .repos
            .event_request_repository
            .find_active_by_venue(venue_id, exclude_event_id)
            .await?;
        to_records(models)
    }

    async fn insert_event(&mut self, event: &EventRecord) -> ApiResult<()> {
        self.repos
            .event_request_repository
            .create(&EventRequestModel::from(event))
            .await?;
        Ok(())
    }

    async fn update_event(&mut self, event: &EventRecord, expected_version: i64) -> ApiResult<()> {
        let swapped = self
            .repos
            .event_request_repository
            .update_versioned(&EventRequestModel::from(event), expected_version)
            .await?;
        if !swapped {
            return Err(ApprovalError::ConcurrentModification {
                event_id: event.id,
                expected_version,
            });
        }
        Ok(())
    }

    async fn append_history(&mut self, entry: &HistoryEntry) -> ApiResult<()> {
        self.repos.event_history_repository.append(entry).await?;
        Ok(())
    }

    async fn commit(self) -> ApiResult<()> {
        self.repos.commit().await?;
        Ok(())
    }
}
