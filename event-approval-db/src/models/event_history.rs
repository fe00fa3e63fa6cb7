use chrono::{DateTime, Utc};
use event_approval_api::{ActorRole, EventStatus, HistoryEntry};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// - One row per accepted transition; rows are inserted, never updated or deleted.
/// - `antecedent_hash` / `hash` chain the rows of one event together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EventHistoryModel {
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

impl Identifiable for EventHistoryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl From<&HistoryEntry> for EventHistoryModel {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id,
            event_id: entry.event_id,
            old_status: entry.old_status,
            new_status: entry.new_status,
            actor_id: entry.actor_id,
            actor_role: entry.actor_role,
            remarks: entry.remarks.clone(),
            created_at: entry.created_at,
            antecedent_hash: entry.antecedent_hash,
            hash: entry.hash,
        }
    }
}

impl From<EventHistoryModel> for HistoryEntry {
    fn from(model: EventHistoryModel) -> Self {
        Self {
            id: model.id,
            event_id: model.event_id,
            old_status: model.old_status,
            new_status: model.new_status,
            actor_id: model.actor_id,
            actor_role: model.actor_role,
            remarks: model.remarks,
            created_at: model.created_at,
            antecedent_hash: model.antecedent_hash,
            hash: model.hash,
        }
    }
}
