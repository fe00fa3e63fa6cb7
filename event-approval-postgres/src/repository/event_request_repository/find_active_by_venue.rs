use event_approval_db::models::event_request::EventRequestModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{EventRequestRepositoryImpl, EVENT_REQUEST_COLUMNS};

impl EventRequestRepositoryImpl {
    /// Events on `venue_id` that still hold their reservation, minus `exclude_event_id`.
    pub async fn find_active_by_venue(
        &self,
        venue_id: Uuid,
        exclude_event_id: Option<Uuid>,
    ) -> Result<Vec<EventRequestModel>, Box<dyn Error + Send + Sync>> {
        let sql = format!(
            "SELECT {EVENT_REQUEST_COLUMNS} FROM event_request \
             WHERE venue_id = $1 \
               AND status NOT IN ('rejected', 'cancelled') \
               AND ($2::uuid IS NULL OR id <> $2)"
        );

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let rows = sqlx::query_as::<_, EventRequestModel>(&sql)
            .bind(venue_id)
            .bind(exclude_event_id)
            .fetch_all(&mut **transaction)
            .await?;
        Ok(rows)
    }
}
