use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use event_approval_api::{ApprovalError, EventRecord, EventStatus, ScheduleWindow, VenueRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::versioned::Versioned;

/// # Documentation
/// - Row shape of an event request.
/// - The venue is split into two mutually exclusive columns; exactly one is non-null.
/// - `version` is compared-and-swapped on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EventRequestModel {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: EventStatus,
    pub venue_id: Option<Uuid>,
    pub other_venue_details: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub submitted_by: Uuid,
    pub hod_approval_at: Option<DateTime<Utc>>,
    pub dean_approval_at: Option<DateTime<Utc>>,
    pub principal_approval_at: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for EventRequestModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Versioned for EventRequestModel {
    fn get_version(&self) -> i64 {
        self.version
    }
}

impl From<&EventRecord> for EventRequestModel {
    fn from(record: &EventRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            status: record.status,
            venue_id: record.venue.managed_id(),
            other_venue_details: record.venue.other_details().map(str::to_string),
            start_date: record.schedule.start_date,
            end_date: record.schedule.end_date,
            start_time: record.schedule.start_time,
            end_time: record.schedule.end_time,
            submitted_by: record.submitted_by,
            hod_approval_at: record.hod_approval_at,
            dean_approval_at: record.dean_approval_at,
            principal_approval_at: record.principal_approval_at,
            remarks: record.remarks.clone(),
            version: record.version,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl TryFrom<EventRequestModel> for EventRecord {
    type Error = ApprovalError;

    fn try_from(model: EventRequestModel) -> Result<Self, Self::Error> {
        let venue = VenueRef::from_columns(model.venue_id, model.other_venue_details)?;
        let schedule = ScheduleWindow::new(
            model.start_date,
            model.end_date,
            model.start_time,
            model.end_time,
        )?;
        Ok(EventRecord {
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status,
            venue,
            schedule,
            submitted_by: model.submitted_by,
            hod_approval_at: model.hod_approval_at,
            dean_approval_at: model.dean_approval_at,
            principal_approval_at: model.principal_approval_at,
            remarks: model.remarks,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(venue: VenueRef) -> EventRecord {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        EventRecord {
            id: Uuid::new_v4(),
            title: "Hackathon".to_string(),
            description: Some("24h build sprint".to_string()),
            status: EventStatus::PendingDean,
            venue,
            schedule: ScheduleWindow::new(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                Some(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            )
            .unwrap(),
            submitted_by: Uuid::new_v4(),
            hod_approval_at: Some(now),
            dean_approval_at: None,
            principal_approval_at: None,
            remarks: None,
            version: 2,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_managed_venue_fills_only_venue_id() {
        let venue_id = Uuid::new_v4();
        let model = EventRequestModel::from(&record(VenueRef::Managed(venue_id)));
        assert_eq!(model.venue_id, Some(venue_id));
        assert_eq!(model.other_venue_details, None);
    }

    #[test]
    fn test_other_venue_fills_only_details() {
        let model = EventRequestModel::from(&record(VenueRef::Other("Football ground".to_string())));
        assert_eq!(model.venue_id, None);
        assert_eq!(model.other_venue_details.as_deref(), Some("Football ground"));
    }

    #[test]
    fn test_row_with_both_venue_columns_is_rejected() {
        let mut model = EventRequestModel::from(&record(VenueRef::Managed(Uuid::new_v4())));
        model.other_venue_details = Some("Football ground".to_string());
        assert!(matches!(
            EventRecord::try_from(model),
            Err(ApprovalError::ValidationError(_))
        ));
    }

    #[test]
    fn test_row_converts_back_to_the_same_record() {
        let original = record(VenueRef::Managed(Uuid::new_v4()));
        let restored = EventRecord::try_from(EventRequestModel::from(&original)).unwrap();
        assert_eq!(restored, original);
    }
}
