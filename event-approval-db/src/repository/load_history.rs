use async_trait::async_trait;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::repository::pagination::{Page, PageRequest};

/// Generic repository trait for loading the transition history of an event with pagination
///
/// Entries are ordered oldest first.
///
/// # Example
/// ```ignore
/// use event_approval_db::repository::pagination::PageRequest;
///
/// let page = repo.load_history(event_id, PageRequest::new(20, 0)).await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait LoadHistory<T: Identifiable>: Send + Sync {
    /// Load one page of history entries for an event
    ///
    /// # Arguments
    /// * `event_id` - The UUID of the event whose history should be loaded
    /// * `page` - The pagination parameters (limit and offset)
    async fn load_history(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<T>, Box<dyn std::error::Error + Send + Sync>>;
}
