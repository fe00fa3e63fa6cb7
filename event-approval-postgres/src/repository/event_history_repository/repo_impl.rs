use crate::executor::Executor;

pub(crate) const EVENT_HISTORY_COLUMNS: &str = "id, event_id, old_status, new_status, \
    actor_id, actor_role, remarks, created_at, antecedent_hash, hash";

/// Append-only access to `event_history`. Rows are never updated or deleted.
pub struct EventHistoryRepositoryImpl {
    pub(crate) executor: Executor,
}

impl EventHistoryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
