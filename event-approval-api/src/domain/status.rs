use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an event request.
///
/// The set is closed: every stored record carries exactly one of these ten values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "event_status", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    PendingHod,
    ReturnedToCoordinator,
    Resubmitted,
    PendingDean,
    ReturnedToHod,
    PendingPrincipal,
    ReturnedToDean,
    Approved,
    Rejected,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 10] = [
        EventStatus::PendingHod,
        EventStatus::ReturnedToCoordinator,
        EventStatus::Resubmitted,
        EventStatus::PendingDean,
        EventStatus::ReturnedToHod,
        EventStatus::PendingPrincipal,
        EventStatus::ReturnedToDean,
        EventStatus::Approved,
        EventStatus::Rejected,
        EventStatus::Cancelled,
    ];

    pub const NON_TERMINAL: [EventStatus; 7] = [
        EventStatus::PendingHod,
        EventStatus::ReturnedToCoordinator,
        EventStatus::Resubmitted,
        EventStatus::PendingDean,
        EventStatus::ReturnedToHod,
        EventStatus::PendingPrincipal,
        EventStatus::ReturnedToDean,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EventStatus::Approved | EventStatus::Rejected | EventStatus::Cancelled
        )
    }

    /// Whether a record in this status still occupies its venue window.
    pub fn holds_reservation(self) -> bool {
        !matches!(self, EventStatus::Rejected | EventStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::PendingHod => "pending_hod",
            EventStatus::ReturnedToCoordinator => "returned_to_coordinator",
            EventStatus::Resubmitted => "resubmitted",
            EventStatus::PendingDean => "pending_dean",
            EventStatus::ReturnedToHod => "returned_to_hod",
            EventStatus::PendingPrincipal => "pending_principal",
            EventStatus::ReturnedToDean => "returned_to_dean",
            EventStatus::Approved => "approved",
            EventStatus::Rejected => "rejected",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}
