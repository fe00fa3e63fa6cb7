use async_trait::async_trait;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading a single entity by its ID
///
/// Unlike [`crate::repository::LoadBatch`], a missing entity is an error.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait Load<T: Identifiable>: Send + Sync {
    /// Load an entity by its unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the entity to load
    ///
    /// # Returns
    /// * `Ok(T)` - The loaded entity
    /// * `Err` - If the entity does not exist or the query failed
    async fn load(&self, id: Uuid) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
