use event_approval_api::{EventRecord, HistoryEntry, Venue};
use uuid::Uuid;

/// Trait for entities that can be uniquely identified by a UUID
pub trait Identifiable {
    /// Returns the unique identifier of the entity
    fn get_id(&self) -> Uuid;
}

impl Identifiable for EventRecord {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for HistoryEntry {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for Venue {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
