use async_trait::async_trait;
use event_approval_db::models::event_request::EventRequestModel;
use event_approval_db::repository::load_batch::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{EventRequestRepositoryImpl, EVENT_REQUEST_COLUMNS};

impl EventRequestRepositoryImpl {
    pub(super) async fn load_batch_impl(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<EventRequestModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT {EVENT_REQUEST_COLUMNS} FROM event_request WHERE id = ANY($1)");
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_as::<_, EventRequestModel>(&sql)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut item_map: HashMap<Uuid, EventRequestModel> =
            rows.into_iter().map(|item| (item.id, item)).collect();
        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<EventRequestModel> for EventRequestRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<EventRequestModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
