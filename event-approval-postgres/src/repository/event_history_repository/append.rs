use event_approval_api::HistoryEntry;
use event_approval_db::models::event_history::EventHistoryModel;
use event_approval_db::utils::seal_history_entry;
use std::error::Error;

use super::repo_impl::EventHistoryRepositoryImpl;

impl EventHistoryRepositoryImpl {
    /// Links `entry` to the event's latest row, seals it and inserts it.
    ///
    /// Callers hold the event row lock (taken by the versioned update), so no other
    /// transaction can append to the same chain concurrently.
    pub async fn append(
        &self,
        entry: &HistoryEntry,
    ) -> Result<EventHistoryModel, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let antecedent_hash: Option<i64> = sqlx::query_scalar(
            "SELECT hash FROM event_history WHERE event_id = $1 ORDER BY seq DESC LIMIT 1",
        )
        .bind(entry.event_id)
        .fetch_optional(&mut **transaction)
        .await?;

        let mut sealed = entry.clone();
        seal_history_entry(&mut sealed, antecedent_hash.unwrap_or(0))?;
        let model = EventHistoryModel::from(&sealed);

        sqlx::query(
            r#"
            INSERT INTO event_history (
                id, event_id, old_status, new_status, actor_id, actor_role,
                remarks, created_at, antecedent_hash, hash
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(model.id)
        .bind(model.event_id)
        .bind(model.old_status)
        .bind(model.new_status)
        .bind(model.actor_id)
        .bind(model.actor_role)
        .bind(&model.remarks)
        .bind(model.created_at)
        .bind(model.antecedent_hash)
        .bind(model.hash)
        .execute(&mut **transaction)
        .await?;

        Ok(model)
    }
}
