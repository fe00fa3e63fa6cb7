use event_approval_api::{EventRecord, ScheduleWindow, VenueRef};
use uuid::Uuid;

/// Inclusive date ranges share at least one day.
pub fn dates_overlap(a: &ScheduleWindow, b: &ScheduleWindow) -> bool {
    a.start_date.max(b.start_date) <= a.effective_end_date().min(b.effective_end_date())
}

/// Daily windows intersect. Touching endpoints (10:00 end, 10:00 start) do not.
pub fn times_overlap(a: &ScheduleWindow, b: &ScheduleWindow) -> bool {
    a.start_time < b.end_time && b.start_time < a.end_time
}

pub fn windows_conflict(a: &ScheduleWindow, b: &ScheduleWindow) -> bool {
    dates_overlap(a, b) && times_overlap(a, b)
}

/// First booking that makes `window` unavailable on `venue`, if any.
///
/// Only bookings on the same managed venue that still hold their reservation are
/// considered, and `exclude_event_id` never conflicts with itself. Free-text venues have
/// no identity to compare and are always free.
pub fn find_conflict<'a, I>(
    venue: &VenueRef,
    window: &ScheduleWindow,
    exclude_event_id: Option<Uuid>,
    bookings: I,
) -> Option<&'a EventRecord>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let venue_id = venue.managed_id()?;
    bookings.into_iter().find(|booking| {
        booking.venue.managed_id() == Some(venue_id)
            && booking.status.holds_reservation()
            && Some(booking.id) != exclude_event_id
            && windows_conflict(window, &booking.schedule)
    })
}

pub fn is_available<'a, I>(
    venue: &VenueRef,
    window: &ScheduleWindow,
    exclude_event_id: Option<Uuid>,
    bookings: I,
) -> bool
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    find_conflict(venue, window, exclude_event_id, bookings).is_none()
}
