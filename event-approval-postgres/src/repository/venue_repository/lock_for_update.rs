use event_approval_db::models::venue::VenueModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::VenueRepositoryImpl;
use crate::utils::TryFromRow;

impl VenueRepositoryImpl {
    /// Row-locks the venue until the surrounding transaction ends.
    ///
    /// Every transaction that admits an event into a slot on this venue takes this lock
    /// before reading the venue's bookings, so those read-check-write sequences run
    /// one at a time per venue.
    pub async fn lock_for_update(
        &self,
        id: Uuid,
    ) -> Result<Option<VenueModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let row = sqlx::query("SELECT id, name, capacity, location FROM venue WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **transaction)
            .await?;
        row.map(|row| VenueModel::try_from_row(&row)).transpose()
    }
}
