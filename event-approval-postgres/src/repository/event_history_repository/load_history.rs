use async_trait::async_trait;
use event_approval_db::models::event_history::EventHistoryModel;
use event_approval_db::repository::load_history::LoadHistory;
use event_approval_db::repository::pagination::{Page, PageRequest};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{EventHistoryRepositoryImpl, EVENT_HISTORY_COLUMNS};

impl EventHistoryRepositoryImpl {
    /// Every entry of an event, oldest first.
    pub async fn load_all(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<EventHistoryModel>, Box<dyn Error + Send + Sync>> {
        let sql = format!(
            "SELECT {EVENT_HISTORY_COLUMNS} FROM event_history WHERE event_id = $1 ORDER BY seq"
        );
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let rows = sqlx::query_as::<_, EventHistoryModel>(&sql)
            .bind(event_id)
            .fetch_all(&mut **transaction)
            .await?;
        Ok(rows)
    }

    pub(super) async fn load_history_impl(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<EventHistoryModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_history WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&mut **transaction)
            .await?;

        let sql = format!(
            "SELECT {EVENT_HISTORY_COLUMNS} FROM event_history WHERE event_id = $1 \
             ORDER BY seq LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, EventHistoryModel>(&sql)
            .bind(event_id)
            .bind(i64::try_from(page.limit)?)
            .bind(i64::try_from(page.offset)?)
            .fetch_all(&mut **transaction)
            .await?;

        Ok(Page::new(items, usize::try_from(total)?, page.limit, page.offset))
    }
}

#[async_trait]
impl LoadHistory<EventHistoryModel> for EventHistoryRepositoryImpl {
    async fn load_history(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<EventHistoryModel>, Box<dyn Error + Send + Sync>> {
        Self::load_history_impl(self, event_id, page).await
    }
}
