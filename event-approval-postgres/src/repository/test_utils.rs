#[cfg(test)]
pub mod test_utils {
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use event_approval_api::{ActorRole, EventStatus, HistoryEntry};
    use event_approval_db::models::event_request::EventRequestModel;
    use event_approval_db::models::venue::VenueModel;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    pub fn create_test_venue(name: &str) -> VenueModel {
        VenueModel {
            id: Uuid::new_v4(),
            name: HeaplessString::try_from(name).unwrap(),
            capacity: Some(150),
            location: HeaplessString::try_from("Academic Block 1").unwrap(),
        }
    }

    /// `venue_id: None` books a free-text venue instead of a managed one.
    pub fn create_test_event(
        venue_id: Option<Uuid>,
        date: &str,
        from: &str,
        to: &str,
    ) -> EventRequestModel {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        EventRequestModel {
            id: Uuid::new_v4(),
            title: "Departmental symposium".to_string(),
            description: None,
            status: EventStatus::PendingHod,
            venue_id,
            other_venue_details: venue_id.is_none().then(|| "Front lawn".to_string()),
            start_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            end_date: None,
            start_time: NaiveTime::parse_from_str(from, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(to, "%H:%M").unwrap(),
            submitted_by: Uuid::new_v4(),
            hod_approval_at: None,
            dean_approval_at: None,
            principal_approval_at: None,
            remarks: None,
            version: 1,
            created_at: created,
            updated_at: created,
        }
    }

    pub fn create_test_history(
        event_id: Uuid,
        old_status: EventStatus,
        new_status: EventStatus,
    ) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            event_id,
            old_status,
            new_status,
            actor_id: Uuid::new_v4(),
            actor_role: ActorRole::Hod,
            remarks: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            antecedent_hash: 0,
            hash: 0,
        }
    }
}
