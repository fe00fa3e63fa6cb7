use event_approval_api::{ActorRole, EventRecord, EventStatus, Notification, Recipient};

/// Role whose decision the event is waiting on, if any.
pub fn awaiting_role(status: EventStatus) -> Option<ActorRole> {
    match status {
        EventStatus::PendingHod | EventStatus::ReturnedToHod | EventStatus::Resubmitted => {
            Some(ActorRole::Hod)
        }
        EventStatus::PendingDean | EventStatus::ReturnedToDean => Some(ActorRole::Dean),
        EventStatus::PendingPrincipal => Some(ActorRole::Principal),
        EventStatus::ReturnedToCoordinator
        | EventStatus::Approved
        | EventStatus::Rejected
        | EventStatus::Cancelled => None,
    }
}

/// The next decision maker, or the submitting coordinator once the ball is in their court.
fn next_recipient(event: &EventRecord) -> Recipient {
    awaiting_role(event.status)
        .map(Recipient::Role)
        .unwrap_or(Recipient::Actor(event.submitted_by))
}

pub fn creation_notifications(event: &EventRecord) -> Vec<Notification> {
    vec![Notification::new(
        Recipient::Role(ActorRole::Hod),
        event.id,
        format!("New event \"{}\" awaits HOD approval", event.title),
    )]
}

pub(crate) fn transition_notifications(
    before: &EventRecord,
    after: &EventRecord,
    actor_role: ActorRole,
) -> Vec<Notification> {
    let message = format!(
        "Event \"{}\" moved from {} to {} by {}",
        after.title, before.status, after.status, actor_role
    );
    let recipient = if after.status == EventStatus::Cancelled {
        // Whoever was due to decide no longer has to.
        Recipient::Role(awaiting_role(before.status).unwrap_or(ActorRole::Hod))
    } else {
        next_recipient(after)
    };
    vec![Notification::new(recipient, after.id, message)]
}

pub(crate) fn revocation_notifications(
    after: &EventRecord,
    revoked_by: ActorRole,
) -> Vec<Notification> {
    let message = format!(
        "{} approval of \"{}\" was revoked; event is back in {}",
        revoked_by, after.title, after.status
    );
    let mut notifications = vec![Notification::new(
        Recipient::Actor(after.submitted_by),
        after.id,
        message.clone(),
    )];
    if let Some(role) = awaiting_role(after.status) {
        notifications.push(Notification::new(Recipient::Role(role), after.id, message));
    }
    notifications
}
