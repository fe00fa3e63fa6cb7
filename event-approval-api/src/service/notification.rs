use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::domain::ActorRole;

/// Who should hear about an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recipient {
    /// A specific person, usually the submitting coordinator.
    Actor(Uuid),
    /// Whoever currently holds the role.
    Role(ActorRole),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: Recipient,
    pub event_id: Uuid,
    pub message: String,
}

impl Notification {
    pub fn new(recipient: Recipient, event_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            recipient,
            event_id,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Fire-and-forget delivery channel invoked after each committed transition.
#[async_trait]
pub trait NotificationTrigger: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Writes every notification to the tracing log and never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl NotificationTrigger for TracingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!(
            recipient = ?notification.recipient,
            event_id = %notification.event_id,
            message = %notification.message,
            "notification"
        );
        Ok(())
    }
}
