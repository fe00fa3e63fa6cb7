use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{ApprovalStage, EventStatus, ScheduleWindow, VenueRef};

/// An event request governed by the approval chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: EventStatus,
    pub venue: VenueRef,
    pub schedule: ScheduleWindow,
    pub submitted_by: Uuid,
    pub hod_approval_at: Option<DateTime<Utc>>,
    pub dean_approval_at: Option<DateTime<Utc>>,
    pub principal_approval_at: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    /// Optimistic-concurrency token, bumped on every accepted write.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRecord {
    pub fn approval_at(&self, stage: ApprovalStage) -> Option<DateTime<Utc>> {
        match stage {
            ApprovalStage::Hod => self.hod_approval_at,
            ApprovalStage::Dean => self.dean_approval_at,
            ApprovalStage::Principal => self.principal_approval_at,
        }
    }

    pub fn set_approval_at(&mut self, stage: ApprovalStage, value: Option<DateTime<Utc>>) {
        match stage {
            ApprovalStage::Hod => self.hod_approval_at = value,
            ApprovalStage::Dean => self.dean_approval_at = value,
            ApprovalStage::Principal => self.principal_approval_at = value,
        }
    }

    pub fn clear_approvals(&mut self) {
        self.hod_approval_at = None;
        self.dean_approval_at = None;
        self.principal_approval_at = None;
    }
}

/// Input for a coordinator's new proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub venue: VenueRef,
    pub schedule: ScheduleWindow,
}

/// Edits a coordinator saves together with a resubmission. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EventChanges {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub venue: Option<VenueRef>,
    pub schedule: Option<ScheduleWindow>,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.venue.is_none()
            && self.schedule.is_none()
    }
}
