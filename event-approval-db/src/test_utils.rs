use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use event_approval_api::{EventRecord, EventStatus, ScheduleWindow, Venue, VenueRef};
use uuid::Uuid;

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn time(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").unwrap()
}

pub fn at(value: &str) -> DateTime<Utc> {
    let naive = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").unwrap();
    Utc.from_utc_datetime(&naive)
}

pub fn window(start: &str, end: Option<&str>, from: &str, to: &str) -> ScheduleWindow {
    ScheduleWindow::new(date(start), end.map(date), time(from), time(to)).unwrap()
}

pub fn venue(name: &str) -> Venue {
    Venue {
        id: Uuid::new_v4(),
        name: name.to_string(),
        capacity: Some(120),
        location: "Main block".to_string(),
    }
}

pub fn event(venue: VenueRef, schedule: ScheduleWindow, status: EventStatus) -> EventRecord {
    let created = at("2024-05-01 08:00");
    EventRecord {
        id: Uuid::new_v4(),
        title: "Inter-college hackathon".to_string(),
        description: Some("Two rounds, judged by faculty".to_string()),
        status,
        venue,
        schedule,
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
