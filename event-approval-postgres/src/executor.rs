use sqlx::{PgPool, Postgres, Transaction};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;

/// One database transaction shared by every repository of a unit of work.
///
/// The transaction is taken out of the slot on commit; any repository call after that
/// fails with "Transaction has been consumed". Dropping the last clone while the
/// transaction is still in the slot rolls it back.
#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self::new(pool.begin().await?))
    }

    pub async fn commit(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let transaction = self
            .tx
            .lock()
            .await
            .take()
            .ok_or("Transaction has been consumed")?;
        transaction.commit().await?;
        Ok(())
    }

    pub async fn rollback(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let transaction = self
            .tx
            .lock()
            .await
            .take()
            .ok_or("Transaction has been consumed")?;
        transaction.rollback().await?;
        Ok(())
    }
}
