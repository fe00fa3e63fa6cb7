use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{ActorRole, ApprovalAction, EventStatus};

/// Every failure the approval core reports to its callers.
///
/// The first seven variants are user-presentable validation outcomes; `ValidationError`
/// covers malformed input and `DatabaseError` covers storage failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApprovalError {
    #[error("Role {role} is not permitted to {action} this event")]
    UnauthorizedRole {
        role: ActorRole,
        action: ApprovalAction,
    },

    #[error("Cannot {action} an event in status {status}")]
    InvalidTransition {
        status: EventStatus,
        action: ApprovalAction,
    },

    #[error("Remarks are required to {action} an event")]
    RemarksRequired { action: ApprovalAction },

    #[error("Venue {venue_id} is already reserved by event {conflicting_event_id} for an overlapping window")]
    VenueUnavailable {
        venue_id: Uuid,
        conflicting_event_id: Uuid,
    },

    #[error("Approval can no longer be revoked: event starts on {start_date}")]
    RevocationWindowClosed { start_date: NaiveDate },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Event {event_id} was modified concurrently (expected version {expected_version})")]
    ConcurrentModification {
        event_id: Uuid,
        expected_version: i64,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ApprovalError {
    pub fn event_not_found(event_id: Uuid) -> Self {
        Self::NotFound(format!("event {event_id}"))
    }

    pub fn venue_not_found(venue_id: Uuid) -> Self {
        Self::NotFound(format!("venue {venue_id}"))
    }

    /// Only a lost compare-and-swap may be retried with fresh state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }
}

impl From<validator::ValidationErrors> for ApprovalError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::ValidationError(errors.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ApprovalError {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::DatabaseError(error.to_string())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for ApprovalError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound("row".to_string()),
            other => Self::DatabaseError(other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApprovalError>;
