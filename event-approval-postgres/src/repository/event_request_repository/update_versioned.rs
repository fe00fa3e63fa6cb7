use event_approval_db::models::event_request::EventRequestModel;
use event_approval_db::models::versioned::Versioned;
use std::error::Error;
use tracing::debug;

use super::repo_impl::EventRequestRepositoryImpl;

impl EventRequestRepositoryImpl {
    /// Compare-and-swap update keyed on `(id, expected_version)`.
    ///
    /// Returns `false` when no row matched: the record is gone or another writer got
    /// there first. `created_at` and `submitted_by` are never rewritten.
    pub async fn update_versioned(
        &self,
        item: &EventRequestModel,
        expected_version: i64,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query(
            r#"
            UPDATE event_request
            SET title = $3, description = $4, status = $5, venue_id = $6,
                other_venue_details = $7, start_date = $8, end_date = $9,
                start_time = $10, end_time = $11, hod_approval_at = $12,
                dean_approval_at = $13, principal_approval_at = $14, remarks = $15,
                version = $16, updated_at = $17
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(item.id)
        .bind(expected_version)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.status)
        .bind(item.venue_id)
        .bind(&item.other_venue_details)
        .bind(item.start_date)
        .bind(item.end_date)
        .bind(item.start_time)
        .bind(item.end_time)
        .bind(item.hod_approval_at)
        .bind(item.dean_approval_at)
        .bind(item.principal_approval_at)
        .bind(&item.remarks)
        .bind(item.get_version())
        .bind(item.updated_at);

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let result = query.execute(&mut **transaction).await?;

        debug!(event_id = %item.id, expected_version, rows = result.rows_affected(), "versioned update");
        Ok(result.rows_affected() == 1)
    }
}
