use async_trait::async_trait;
use event_approval_db::models::venue::VenueModel;
use event_approval_db::repository::load_batch::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::VenueRepositoryImpl;
use crate::utils::TryFromRow;

impl VenueRepositoryImpl {
    pub(super) async fn load_batch_impl(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<VenueModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT id, name, capacity, location FROM venue WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut item_map = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = VenueModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<VenueModel> for VenueRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<VenueModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
