use async_trait::async_trait;
use event_approval_api::{ApiResult, EventRecord, HistoryEntry, Venue};
use uuid::Uuid;

use crate::repository::pagination::{Page, PageRequest};

/// Persistent store behind the approval engine.
///
/// Reads outside a unit of work see committed state only. Every write goes through an
/// [`ApprovalUnitOfWork`] so the record update and its history entry commit together.
#[async_trait]
pub trait ApprovalStore: Send + Sync {
    type UnitOfWork: ApprovalUnitOfWork;

    /// Start a unit of work. Dropping it without [`ApprovalUnitOfWork::commit`] discards
    /// every write made through it.
    async fn begin(&self) -> ApiResult<Self::UnitOfWork>;

    async fn load_event(&self, event_id: Uuid) -> ApiResult<Option<EventRecord>>;

    async fn load_venue(&self, venue_id: Uuid) -> ApiResult<Option<Venue>>;

    /// Records on `venue_id` that still hold their reservation, excluding `exclude_event_id`.
    async fn find_active_bookings(
        &self,
        venue_id: Uuid,
        exclude_event_id: Option<Uuid>,
    ) -> ApiResult<Vec<EventRecord>>;

    /// Every history entry of an event, oldest first.
    async fn load_history(&self, event_id: Uuid) -> ApiResult<Vec<HistoryEntry>>;

    async fn load_history_page(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry>>;
}

/// One atomic read-modify-write against the store.
#[async_trait]
pub trait ApprovalUnitOfWork: Send {
    async fn load_event(&mut self, event_id: Uuid) -> ApiResult<Option<EventRecord>>;

    /// Locking read of a venue. Holding the lock until commit serializes every booking
    /// decision on that venue; bookings on other venues are unaffected.
    async fn lock_venue(&mut self, venue_id: Uuid) -> ApiResult<Option<Venue>>;

    async fn find_active_bookings(
        &mut self,
        venue_id: Uuid,
        exclude_event_id: Option<Uuid>,
    ) -> ApiResult<Vec<EventRecord>>;

    async fn insert_event(&mut self, event: &EventRecord) -> ApiResult<()>;

    /// Compare-and-swap write. Fails with `ConcurrentModification` when the stored
    /// version is no longer `expected_version`.
    async fn update_event(&mut self, event: &EventRecord, expected_version: i64) -> ApiResult<()>;

    /// Append a history entry; the store links it into the event's hash chain.
    async fn append_history(&mut self, entry: &HistoryEntry) -> ApiResult<()>;

    async fn commit(self) -> ApiResult<()>;
}
