use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiResult, ApprovalError};

pub const OTHER_VENUE_MAX_LEN: usize = 500;

/// Where an event takes place: a managed venue, or free-text details for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum VenueRef {
    Managed(Uuid),
    Other(String),
}

impl VenueRef {
    pub fn managed_id(&self) -> Option<Uuid> {
        match self {
            VenueRef::Managed(id) => Some(*id),
            VenueRef::Other(_) => None,
        }
    }

    pub fn other_details(&self) -> Option<&str> {
        match self {
            VenueRef::Managed(_) => None,
            VenueRef::Other(details) => Some(details.as_str()),
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        if let VenueRef::Other(details) = self {
            if details.trim().is_empty() {
                return Err(ApprovalError::ValidationError(
                    "other venue details must not be empty".to_string(),
                ));
            }
            if details.chars().count() > OTHER_VENUE_MAX_LEN {
                return Err(ApprovalError::ValidationError(format!(
                    "other venue details exceed {OTHER_VENUE_MAX_LEN} characters"
                )));
            }
        }
        Ok(())
    }

    /// Rebuilds the reference from its two mutually exclusive storage columns.
    pub fn from_columns(venue_id: Option<Uuid>, other_details: Option<String>) -> ApiResult<Self> {
        match (venue_id, other_details) {
            (Some(id), None) => Ok(VenueRef::Managed(id)),
            (None, Some(details)) => Ok(VenueRef::Other(details)),
            (Some(_), Some(_)) => Err(ApprovalError::ValidationError(
                "event references both a managed venue and other venue details".to_string(),
            )),
            (None, None) => Err(ApprovalError::ValidationError(
                "event references no venue".to_string(),
            )),
        }
    }
}

/// A bookable place managed by the institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub capacity: Option<i32>,
    pub location: String,
}
