use event_approval_api::EventRecord;

use super::identifiable::Identifiable;

/// Trait for entities whose writes are guarded by an optimistic version token
pub trait Versioned: Identifiable {
    /// Returns the version the stored row currently carries
    fn get_version(&self) -> i64;
}

impl Versioned for EventRecord {
    fn get_version(&self) -> i64 {
        self.version
    }
}
