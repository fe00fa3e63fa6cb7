use async_trait::async_trait;
use event_approval_db::models::event_request::EventRequestModel;
use event_approval_db::repository::load::Load;
use event_approval_db::repository::load_batch::LoadBatch;
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;

pub(crate) const EVENT_REQUEST_COLUMNS: &str = "id, title, description, status, venue_id, \
    other_venue_details, start_date, end_date, start_time, end_time, submitted_by, \
    hod_approval_at, dean_approval_at, principal_approval_at, remarks, version, \
    created_at, updated_at";

pub struct EventRequestRepositoryImpl {
    pub(crate) executor: Executor,
}

impl EventRequestRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<EventRequestModel> for EventRequestRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<EventRequestModel, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| format!("event {id} not found").into())
    }
}
