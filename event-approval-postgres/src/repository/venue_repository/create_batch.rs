use async_trait::async_trait;
use event_approval_db::models::venue::VenueModel;
use event_approval_db::repository::create_batch::CreateBatch;
use std::error::Error;

use super::repo_impl::VenueRepositoryImpl;

impl VenueRepositoryImpl {
    pub(super) async fn create_batch_impl(
        &self,
        items: Vec<VenueModel>,
    ) -> Result<Vec<VenueModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO venue (id, name, capacity, location)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.capacity)
            .bind(item.location.as_str())
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<VenueModel> for VenueRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<VenueModel>,
    ) -> Result<Vec<VenueModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
