use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use event_approval_api::{ApiResult, EventRecord, HistoryEntry, Venue};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::unit_of_work::InMemoryUnitOfWork;
use crate::repository::approval_store::ApprovalStore;
use crate::repository::create_batch::CreateBatch;
use crate::repository::load::Load;
use crate::repository::load_batch::LoadBatch;
use crate::repository::load_history::LoadHistory;
use crate::repository::pagination::{Page, PageRequest};

/// Committed state shared by the store and its units of work.
#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub(crate) events: HashMap<Uuid, EventRecord>,
    pub(crate) venues: HashMap<Uuid, Venue>,
    /// Per event, oldest first.
    pub(crate) history: HashMap<Uuid, Vec<HistoryEntry>>,
}

impl MemoryState {
    pub(crate) fn active_bookings(
        &self,
        venue_id: Uuid,
        exclude_event_id: Option<Uuid>,
    ) -> Vec<EventRecord> {
        self.events
            .values()
            .filter(|event| is_active_booking(event, venue_id, exclude_event_id))
            .cloned()
            .collect()
    }
}

pub(crate) fn is_active_booking(
    event: &EventRecord,
    venue_id: Uuid,
    exclude_event_id: Option<Uuid>,
) -> bool {
    event.venue.managed_id() == Some(venue_id)
        && event.status.holds_reservation()
        && Some(event.id) != exclude_event_id
}

pub(crate) type VenueLocks = Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>;

/// Approval store backed by hash maps behind a `RwLock`.
///
/// Per-venue async mutexes stand in for the row lock a database would take, so two
/// units of work booking the same venue run one after the other.
#[derive(Debug, Default, Clone)]
pub struct InMemoryApprovalStore {
    state: Arc<RwLock<MemoryState>>,
    venue_locks: VenueLocks,
}

impl InMemoryApprovalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a managed venue, replacing any venue with the same id.
    pub async fn add_venue(&self, venue: Venue) {
        let mut state = self.state.write().await;
        state.venues.insert(venue.id, venue);
    }
}

#[async_trait]
impl ApprovalStore for InMemoryApprovalStore {
    type UnitOfWork = InMemoryUnitOfWork;

    async fn begin(&self) -> ApiResult<Self::UnitOfWork> {
        Ok(InMemoryUnitOfWork::new(
            self.state.clone(),
            self.venue_locks.clone(),
        ))
    }

    async fn load_event(&self, event_id: Uuid) -> ApiResult<Option<EventRecord>> {
        let state = self.state.read().await;
        Ok(state.events.get(&event_id).cloned())
    }

    async fn load_venue(&self, venue_id: Uuid) -> ApiResult<Option<Venue>> {
        let state = self.state.read().await;
        Ok(state.venues.get(&venue_id).cloned())
    }

    async fn find_active_bookings(
        &self,
        venue_id: Uuid,
        exclude_event_id: Option<Uuid>,
    ) -> ApiResult<Vec<EventRecord>> {
        let state = self.state.read().await;
        Ok(state.active_bookings(venue_id, exclude_event_id))
    }

    async fn load_history(&self, event_id: Uuid) -> ApiResult<Vec<HistoryEntry>> {
        let state = self.state.read().await;
        Ok(state.history.get(&event_id).cloned().unwrap_or_default())
    }

    async fn load_history_page(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry>> {
        let state = self.state.read().await;
        let entries = state.history.get(&event_id).map(Vec::as_slice).unwrap_or(&[]);
        Ok(Page::from_slice(entries, page))
    }
}

#[async_trait]
impl CreateBatch<Venue> for InMemoryApprovalStore {
    async fn create_batch(
        &self,
        items: Vec<Venue>,
    ) -> Result<Vec<Venue>, Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.write().await;
        if let Some(existing) = items.iter().find(|venue| state.venues.contains_key(&venue.id)) {
            return Err(format!("venue {} already exists", existing.id).into());
        }
        for venue in &items {
            state.venues.insert(venue.id, venue.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl LoadBatch<Venue> for InMemoryApprovalStore {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<Venue>>, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.state.read().await;
        Ok(ids.iter().map(|id| state.venues.get(id).cloned()).collect())
    }
}

#[async_trait]
impl Load<Venue> for InMemoryApprovalStore {
    async fn load(&self, id: Uuid) -> Result<Venue, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.state.read().await;
        state
            .venues
            .get(&id)
            .cloned()
            .ok_or_else(|| format!("venue {id} not found").into())
    }
}

#[async_trait]
impl LoadHistory<HistoryEntry> for InMemoryApprovalStore {
    async fn load_history(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<HistoryEntry>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.load_history_page(event_id, page).await?)
    }
}
