use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ActorRole, EventStatus};

/// One accepted transition, as recorded in the append-only history log.
///
/// `antecedent_hash` links to the previous entry of the same event (0 for the first);
/// `hash` covers the entry itself with `hash` zeroed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub event_id: Uuid,
    pub old_status: EventStatus,
    pub new_status: EventStatus,
    pub actor_id: Uuid,
    pub actor_role: ActorRole,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub antecedent_hash: i64,
    pub hash: i64,
}
