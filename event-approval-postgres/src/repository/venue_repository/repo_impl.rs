use async_trait::async_trait;
use event_approval_db::models::venue::VenueModel;
use event_approval_db::repository::load::Load;
use event_approval_db::repository::load_batch::LoadBatch;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::{get_heapless_string, TryFromRow};

pub struct VenueRepositoryImpl {
    pub(crate) executor: Executor,
}

impl VenueRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for VenueModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(VenueModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            capacity: row.try_get("capacity")?,
            location: get_heapless_string(row, "location")?,
        })
    }
}

#[async_trait]
impl Load<VenueModel> for VenueRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<VenueModel, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| format!("venue {id} not found").into())
    }
}
