use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use event_approval_api::{ApiResult, ApprovalError, EventRecord, HistoryEntry, Venue};
use tokio::sync::{OwnedMutexGuard, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::store::{is_active_booking, MemoryState, VenueLocks};
use crate::models::versioned::Versioned;
use crate::repository::approval_store::ApprovalUnitOfWork;
use crate::utils::seal_history_entry;

/// Buffers writes until [`ApprovalUnitOfWork::commit`]; dropping it discards them and
/// releases every venue lock it holds.
pub struct InMemoryUnitOfWork {
    state: Arc<RwLock<MemoryState>>,
    venue_locks: VenueLocks,
    held: HashMap<Uuid, OwnedMutexGuard<()>>,
    inserts: Vec<EventRecord>,
    updates: Vec<(EventRecord, i64)>,
    history: Vec<HistoryEntry>,
}

impl InMemoryUnitOfWork {
    pub(crate) fn new(state: Arc<RwLock<MemoryState>>, venue_locks: VenueLocks) -> Self {
        Self {
            state,
            venue_locks,
            held: HashMap::new(),
            inserts: Vec::new(),
            updates: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Latest buffered version of an event written in this unit of work.
    fn buffered(&self, event_id: Uuid) -> Option<&EventRecord> {
        self.updates
            .iter()
            .rev()
            .map(|(event, _)| event)
            .find(|event| event.id == event_id)
            .or_else(|| self.inserts.iter().find(|event| event.id == event_id))
    }

    async fn current(&self, event_id: Uuid) -> Option<EventRecord> {
        if let Some(event) = self.buffered(event_id) {
            return Some(event.clone());
        }
        let state = self.state.read().await;
        state.events.get(&event_id).cloned()
    }
}

fn concurrent_modification(event: &EventRecord, expected_version: i64) -> ApprovalError {
    ApprovalError::ConcurrentModification {
        event_id: event.id,
        expected_version,
    }
}

#[async_trait]
impl ApprovalUnitOfWork for InMemoryUnitOfWork {
    async fn load_event(&mut self, event_id: Uuid) -> ApiResult<Option<EventRecord>> {
        Ok(self.current(event_id).await)
    }

    async fn lock_venue(&mut self, venue_id: Uuid) -> ApiResult<Option<Venue>> {
        if !self.held.contains_key(&venue_id) {
            let lock = {
                let mut locks = self.venue_locks.lock().await;
                locks.entry(venue_id).or_default().clone()
            };
            let guard = lock.lock_owned().await;
            self.held.insert(venue_id, guard);
        }
        let state = self.state.read().await;
        Ok(state.venues.get(&venue_id).cloned())
    }

    async fn find_active_bookings(
        &mut self,
        venue_id: Uuid,
        exclude_event_id: Option<Uuid>,
    ) -> ApiResult<Vec<EventRecord>> {
        let state = self.state.read().await;
        let mut bookings: HashMap<Uuid, EventRecord> = state
            .active_bookings(venue_id, exclude_event_id)
            .into_iter()
            .map(|event| (event.id, event))
            .collect();
        drop(state);

        let pending = self
            .inserts
            .iter()
            .chain(self.updates.iter().map(|(event, _)| event));
        for event in pending {
            if is_active_booking(event, venue_id, exclude_event_id) {
                bookings.insert(event.id, event.clone());
            } else {
                bookings.remove(&event.id);
            }
        }
        Ok(bookings.into_values().collect())
    }

    async fn insert_event(&mut self, event: &EventRecord) -> ApiResult<()> {
        if self.current(event.id).await.is_some() {
            return Err(ApprovalError::DatabaseError(format!(
                "event {} already exists",
                event.id
            )));
        }
        self.inserts.push(event.clone());
        Ok(())
    }

    async fn update_event(&mut self, event: &EventRecord, expected_version: i64) -> ApiResult<()> {
        let current = self
            .current(event.id)
            .await
            .ok_or_else(|| ApprovalError::event_not_found(event.id))?;
        if current.get_version() != expected_version {
            return Err(concurrent_modification(event, expected_version));
        }
        self.updates.push((event.clone(), expected_version));
        Ok(())
    }

    async fn append_history(&mut self, entry: &HistoryEntry) -> ApiResult<()> {
        self.history.push(entry.clone());
        Ok(())
    }

    async fn commit(self) -> ApiResult<()> {
        let mut state = self.state.write().await;

        // Validate everything against committed state before touching it.
        let mut versions: HashMap<Uuid, i64> = HashMap::new();
        for event in &self.inserts {
            if state.events.contains_key(&event.id) {
                return Err(ApprovalError::DatabaseError(format!(
                    "event {} already exists",
                    event.id
                )));
            }
            versions.insert(event.id, event.version);
        }
        for (event, expected_version) in &self.updates {
            let stored = versions
                .get(&event.id)
                .copied()
                .or_else(|| state.events.get(&event.id).map(Versioned::get_version));
            match stored {
                Some(version) if version == *expected_version => {
                    versions.insert(event.id, event.get_version());
                }
                Some(_) => return Err(concurrent_modification(event, *expected_version)),
                None => return Err(ApprovalError::event_not_found(event.id)),
            }
        }

        let mut heads: HashMap<Uuid, i64> = HashMap::new();
        let mut sealed = Vec::with_capacity(self.history.len());
        for entry in &self.history {
            let antecedent = match heads.get(&entry.event_id) {
                Some(hash) => *hash,
                None => state
                    .history
                    .get(&entry.event_id)
                    .and_then(|entries| entries.last())
                    .map(|last| last.hash)
                    .unwrap_or(0),
            };
            let mut entry = entry.clone();
            seal_history_entry(&mut entry, antecedent).map_err(ApprovalError::DatabaseError)?;
            heads.insert(entry.event_id, entry.hash);
            sealed.push(entry);
        }

        for event in self.inserts.into_iter().chain(self.updates.into_iter().map(|(event, _)| event)) {
            state.events.insert(event.id, event);
        }
        for entry in sealed {
            state.history.entry(entry.event_id).or_default().push(entry);
        }
        debug!(venue_locks = self.held.len(), "in-memory unit of work committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::memory::InMemoryApprovalStore;
    use crate::repository::approval_store::{ApprovalStore, ApprovalUnitOfWork};
    use crate::test_utils::{at, event, venue, window};
    use crate::utils::verify_history_chain;
    use event_approval_api::{ActorRole, ApprovalError, EventStatus, HistoryEntry, VenueRef};
    use tokio_test::{assert_err, assert_ok};
    use uuid::Uuid;

    fn history_for(record: &event_approval_api::EventRecord, new_status: EventStatus) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            event_id: record.id,
            old_status: record.status,
            new_status,
            actor_id: Uuid::new_v4(),
            actor_role: ActorRole::Hod,
            remarks: None,
            created_at: at("2024-06-01 09:00"),
            antecedent_hash: 0,
            hash: 0,
        }
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_discards_writes() {
        let store = InMemoryApprovalStore::new();
        let record = event(
            VenueRef::Other("Lawn".to_string()),
            window("2024-07-01", None, "09:00", "10:00"),
            EventStatus::PendingHod,
        );
        {
            let mut uow = assert_ok!(store.begin().await);
            assert_ok!(uow.insert_event(&record).await);
            assert!(assert_ok!(uow.load_event(record.id).await).is_some());
        }
        assert!(assert_ok!(store.load_event(record.id).await).is_none());
    }

    #[tokio::test]
    async fn test_stale_version_is_refused_at_commit() {
        let store = InMemoryApprovalStore::new();
        let record = event(
            VenueRef::Other("Lawn".to_string()),
            window("2024-07-01", None, "09:00", "10:00"),
            EventStatus::PendingHod,
        );
        let mut seed = assert_ok!(store.begin().await);
        assert_ok!(seed.insert_event(&record).await);
        assert_ok!(seed.commit().await);

        let mut next = record.clone();
        next.status = EventStatus::PendingDean;
        next.version = 2;

        let mut first = assert_ok!(store.begin().await);
        let mut second = assert_ok!(store.begin().await);
        assert_ok!(first.update_event(&next, 1).await);
        assert_ok!(second.update_event(&next, 1).await);
        assert_ok!(first.commit().await);

        let err = assert_err!(second.commit().await);
        assert_eq!(
            err,
            ApprovalError::ConcurrentModification {
                event_id: record.id,
                expected_version: 1
            }
        );

        let mut late = assert_ok!(store.begin().await);
        assert_err!(late.update_event(&next, 1).await);
    }

    #[tokio::test]
    async fn test_history_is_chained_across_commits() {
        let store = InMemoryApprovalStore::new();
        let record = event(
            VenueRef::Other("Lawn".to_string()),
            window("2024-07-01", None, "09:00", "10:00"),
            EventStatus::PendingHod,
        );
        let mut uow = assert_ok!(store.begin().await);
        assert_ok!(uow.insert_event(&record).await);
        assert_ok!(uow.append_history(&history_for(&record, EventStatus::PendingDean)).await);
        assert_ok!(uow.commit().await);

        let mut uow = assert_ok!(store.begin().await);
        assert_ok!(uow.append_history(&history_for(&record, EventStatus::ReturnedToHod)).await);
        assert_ok!(uow.commit().await);

        let history = assert_ok!(store.load_history(record.id).await);
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].antecedent_hash, history[0].hash);
        assert!(verify_history_chain(&history));
    }

    #[tokio::test]
    async fn test_buffered_writes_are_visible_to_conflict_reads() {
        let store = InMemoryApprovalStore::new();
        let hall = venue("Hall B");
        store.add_venue(hall.clone()).await;
        let booked = event(
            VenueRef::Managed(hall.id),
            window("2024-07-01", None, "09:00", "10:00"),
            EventStatus::PendingHod,
        );

        let mut uow = assert_ok!(store.begin().await);
        assert_eq!(assert_ok!(uow.lock_venue(hall.id).await), Some(hall.clone()));
        assert_ok!(uow.insert_event(&booked).await);
        let bookings = assert_ok!(uow.find_active_bookings(hall.id, None).await);
        assert_eq!(bookings, vec![booked.clone()]);
        assert!(assert_ok!(uow.find_active_bookings(hall.id, Some(booked.id)).await).is_empty());

        let mut cancelled = booked.clone();
        cancelled.status = EventStatus::Cancelled;
        cancelled.version = 2;
        assert_ok!(uow.update_event(&cancelled, 1).await);
        assert!(assert_ok!(uow.find_active_bookings(hall.id, None).await).is_empty());
        assert_ok!(uow.commit().await);

        assert_eq!(
            assert_ok!(store.load_event(booked.id).await).map(|e| e.status),
            Some(EventStatus::Cancelled)
        );
    }
}
