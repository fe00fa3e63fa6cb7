use event_approval_db::models::event_request::EventRequestModel;
use std::error::Error;

use super::repo_impl::EventRequestRepositoryImpl;

impl EventRequestRepositoryImpl {
    pub async fn create(
        &self,
        item: &EventRequestModel,
    ) -> Result<EventRequestModel, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query(
            r#"
            INSERT INTO event_request (
                id, title, description, status, venue_id, other_venue_details,
                start_date, end_date, start_time, end_time, submitted_by,
                hod_approval_at, dean_approval_at, principal_approval_at,
                remarks, version, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.status)
        .bind(item.venue_id)
        .bind(&item.other_venue_details)
        .bind(item.start_date)
        .bind(item.end_date)
        .bind(item.start_time)
        .bind(item.end_time)
        .bind(item.submitted_by)
        .bind(item.hod_approval_at)
        .bind(item.dean_approval_at)
        .bind(item.principal_approval_at)
        .bind(&item.remarks)
        .bind(item.version)
        .bind(item.created_at)
        .bind(item.updated_at);

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        query.execute(&mut **transaction).await?;

        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_utils::test_utils::{create_test_event, create_test_venue};
    use crate::test_helper::setup_test_context;
    use event_approval_db::repository::create_batch::CreateBatch;
    use event_approval_db::repository::load::Load;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_create_and_load() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let venue = create_test_venue("Main Auditorium");
        ctx.repos().venue_repository.create_batch(vec![venue.clone()]).await?;

        let event_repo = &ctx.repos().event_request_repository;
        let event = create_test_event(Some(venue.id), "2024-07-01", "14:00", "16:00");
        event_repo.create(&event).await?;

        assert_eq!(event_repo.load(event.id).await?, event);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_schema_rejects_both_venue_columns() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let venue = create_test_venue("Main Auditorium");
        ctx.repos().venue_repository.create_batch(vec![venue.clone()]).await?;

        let mut event = create_test_event(Some(venue.id), "2024-07-01", "14:00", "16:00");
        event.other_venue_details = Some("Also the lawn".to_string());
        assert!(ctx.repos().event_request_repository.create(&event).await.is_err());
        Ok(())
    }
}
