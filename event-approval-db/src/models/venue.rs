use event_approval_api::{ApprovalError, Venue};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Venue Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueModel {
    pub id: Uuid,
    pub name: HeaplessString<100>,
    pub capacity: Option<i32>,
    pub location: HeaplessString<200>,
}

impl Identifiable for VenueModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl TryFrom<&Venue> for VenueModel {
    type Error = ApprovalError;

    fn try_from(venue: &Venue) -> Result<Self, Self::Error> {
        let name = HeaplessString::from_str(&venue.name).map_err(|_| {
            ApprovalError::ValidationError("venue name is too long (max 100 chars)".to_string())
        })?;
        let location = HeaplessString::from_str(&venue.location).map_err(|_| {
            ApprovalError::ValidationError("venue location is too long (max 200 chars)".to_string())
        })?;
        if venue.capacity.is_some_and(|capacity| capacity <= 0) {
            return Err(ApprovalError::ValidationError(
                "venue capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            id: venue.id,
            name,
            capacity: venue.capacity,
            location,
        })
    }
}

impl From<VenueModel> for Venue {
    fn from(model: VenueModel) -> Self {
        Self {
            id: model.id,
            name: model.name.as_str().to_string(),
            capacity: model.capacity,
            location: model.location.as_str().to_string(),
        }
    }
}
