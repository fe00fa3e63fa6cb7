use chrono::{DateTime, NaiveDate, Utc};
use event_approval_api::{
    Actor, ApiResult, ApprovalAction, ApprovalError, EventChanges, EventRecord,
    EventStatus, HistoryEntry, Notification,
};
use uuid::Uuid;
use validator::Validate;

use super::notifications::{revocation_notifications, transition_notifications};
use super::revocation::revocation_rule;
use super::transition_table::rule_for;

/// Everything an accepted action changes, computed before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// Version the stored record must still carry for the write to land.
    pub expected_version: i64,
    pub next: EventRecord,
    /// Unsealed; the store fills in the hash chain on append.
    pub history: HistoryEntry,
    pub notifications: Vec<Notification>,
    /// Whether `next` claims a managed venue slot and must pass the conflict check.
    pub venue_check: bool,
}

/// Trimmed remarks, with blank input treated as absent.
pub fn normalize_remarks(remarks: Option<String>) -> Option<String> {
    remarks
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Validates `action` by `actor` against `event` and computes the resulting record.
///
/// Checks run in a fixed order: role, ownership, source status, remarks. `changes` is
/// only consulted for `Resubmit`. `Revoke` is delegated to [`plan_revocation`], with the
/// window judged on the UTC date of `now`.
pub fn plan_transition(
    event: &EventRecord,
    actor: &Actor,
    action: ApprovalAction,
    remarks: Option<String>,
    changes: Option<&EventChanges>,
    now: DateTime<Utc>,
) -> ApiResult<TransitionPlan> {
    if action == ApprovalAction::Revoke {
        return plan_revocation(event, actor, now, now.date_naive());
    }

    let unauthorized = ApprovalError::UnauthorizedRole {
        role: actor.role,
        action,
    };
    let rule = rule_for(actor.role, action).ok_or_else(|| unauthorized.clone())?;
    if rule.owner_only() && event.submitted_by != actor.id {
        return Err(unauthorized);
    }
    if !rule.accepts(event.status) {
        return Err(ApprovalError::InvalidTransition {
            status: event.status,
            action,
        });
    }
    let remarks = normalize_remarks(remarks);
    if rule.requires_remarks() && remarks.is_none() {
        return Err(ApprovalError::RemarksRequired { action });
    }

    let mut next = event.clone();
    next.status = rule.target;
    if let Some(stage) = rule.stamps {
        next.set_approval_at(stage, Some(now));
    }
    match action {
        ApprovalAction::Resubmit => {
            if let Some(changes) = changes.filter(|changes| !changes.is_empty()) {
                apply_changes(&mut next, changes)?;
            }
            next.clear_approvals();
            next.remarks = None;
        }
        ApprovalAction::Cancel => {}
        _ => next.remarks = remarks.clone(),
    }
    next.version = event.version + 1;
    next.updated_at = now;

    let venue_check = rule.enters_reserved_slot() && next.venue.managed_id().is_some();
    let notifications = transition_notifications(event, &next, actor.role);
    let history = history_entry(event, &next, actor, remarks, now);

    Ok(TransitionPlan {
        expected_version: event.version,
        next,
        history,
        notifications,
        venue_check,
    })
}

/// Plans the retraction of `actor`'s own sign-off.
///
/// Order: role, terminal status, own timestamp present, then the start-date window.
/// Revocation is only possible while `today` is strictly before the event's first day.
pub fn plan_revocation(
    event: &EventRecord,
    actor: &Actor,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> ApiResult<TransitionPlan> {
    let action = ApprovalAction::Revoke;
    let stage = actor
        .role
        .approval_stage()
        .ok_or(ApprovalError::UnauthorizedRole {
            role: actor.role,
            action,
        })?;
    let invalid = ApprovalError::InvalidTransition {
        status: event.status,
        action,
    };
    if matches!(event.status, EventStatus::Rejected | EventStatus::Cancelled) {
        return Err(invalid);
    }
    if event.approval_at(stage).is_none() {
        return Err(invalid);
    }
    if today >= event.schedule.start_date {
        return Err(ApprovalError::RevocationWindowClosed {
            start_date: event.schedule.start_date,
        });
    }

    let rule = revocation_rule(stage);
    let mut next = event.clone();
    next.status = rule.target;
    for cleared in rule.clears {
        next.set_approval_at(*cleared, None);
    }
    next.version = event.version + 1;
    next.updated_at = now;

    let remarks = format!("{} approval revoked; event reverted to {}", stage, rule.target);
    let notifications = revocation_notifications(&next, actor.role);
    let history = history_entry(event, &next, actor, Some(remarks), now);

    Ok(TransitionPlan {
        expected_version: event.version,
        next,
        history,
        notifications,
        venue_check: false,
    })
}

fn apply_changes(next: &mut EventRecord, changes: &EventChanges) -> ApiResult<()> {
    changes.validate()?;
    if let Some(title) = &changes.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApprovalError::ValidationError(
                "title must not be empty".to_string(),
            ));
        }
        next.title = title.to_string();
    }
    if let Some(description) = &changes.description {
        next.description = normalize_remarks(Some(description.clone()));
    }
    if let Some(venue) = &changes.venue {
        venue.validate()?;
        next.venue = venue.clone();
    }
    if let Some(schedule) = changes.schedule {
        schedule.validate()?;
        next.schedule = schedule;
    }
    Ok(())
}

fn history_entry(
    before: &EventRecord,
    after: &EventRecord,
    actor: &Actor,
    remarks: Option<String>,
    now: DateTime<Utc>,
) -> HistoryEntry {
    HistoryEntry {
        id: Uuid::new_v4(),
        event_id: before.id,
        old_status: before.status,
        new_status: after.status,
        actor_id: actor.id,
        actor_role: actor.role,
        remarks,
        created_at: now,
        antecedent_hash: 0,
        hash: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, date, event, window};
    use event_approval_api::{ActorRole, ApprovalStage, Recipient, VenueRef};

    fn pending_hod() -> EventRecord {
        event(
            VenueRef::Managed(Uuid::new_v4()),
            window("2024-07-01", None, "14:00", "16:00"),
            EventStatus::PendingHod,
        )
    }

    fn hod() -> Actor {
        Actor::hod(Uuid::new_v4())
    }

    #[test]
    fn test_hod_approval_stamps_only_hod() {
        let record = pending_hod();
        let now = at("2024-06-01 10:00");
        let plan = plan_transition(&record, &hod(), ApprovalAction::Approve, None, None, now)
            .unwrap();

        assert_eq!(plan.next.status, EventStatus::PendingDean);
        assert_eq!(plan.next.hod_approval_at, Some(now));
        assert_eq!(plan.next.dean_approval_at, None);
        assert_eq!(plan.next.principal_approval_at, None);
        assert_eq!(plan.next.version, record.version + 1);
        assert_eq!(plan.expected_version, record.version);
        assert!(plan.venue_check);
        assert_eq!(
            plan.notifications[0].recipient,
            Recipient::Role(ActorRole::Dean)
        );
    }

    #[test]
    fn test_validation_order_is_role_then_status_then_remarks() {
        let mut record = pending_hod();
        record.status = EventStatus::PendingDean;

        // Wrong role wins over wrong status.
        let coordinator = Actor::coordinator(record.submitted_by);
        let err = plan_transition(&record, &coordinator, ApprovalAction::Reject, None, None, at("2024-06-01 10:00"))
            .unwrap_err();
        assert!(matches!(err, ApprovalError::UnauthorizedRole { .. }));

        // Wrong status wins over missing remarks.
        let err = plan_transition(&record, &hod(), ApprovalAction::Reject, None, None, at("2024-06-01 10:00"))
            .unwrap_err();
        assert_eq!(
            err,
            ApprovalError::InvalidTransition {
                status: EventStatus::PendingDean,
                action: ApprovalAction::Reject,
            }
        );
    }

    #[test]
    fn test_reject_and_return_require_non_blank_remarks() {
        let record = pending_hod();
        for action in [ApprovalAction::Reject, ApprovalAction::Return] {
            for remarks in [None, Some("   ".to_string())] {
                let err = plan_transition(&record, &hod(), action, remarks, None, at("2024-06-01 10:00"))
                    .unwrap_err();
                assert_eq!(err, ApprovalError::RemarksRequired { action });
            }
        }
    }

    #[test]
    fn test_reject_records_trimmed_remarks() {
        let record = pending_hod();
        let plan = plan_transition(
            &record,
            &hod(),
            ApprovalAction::Reject,
            Some("  Budget missing ".to_string()),
            None,
            at("2024-06-01 10:00"),
        )
        .unwrap();
        assert_eq!(plan.next.status, EventStatus::Rejected);
        assert_eq!(plan.history.new_status, EventStatus::Rejected);
        assert_eq!(plan.history.remarks.as_deref(), Some("Budget missing"));
        assert_eq!(plan.next.remarks.as_deref(), Some("Budget missing"));
        assert!(!plan.venue_check);
        assert_eq!(
            plan.notifications[0].recipient,
            Recipient::Actor(record.submitted_by)
        );
    }

    #[test]
    fn test_only_the_submitter_may_cancel() {
        let record = pending_hod();
        let stranger = Actor::coordinator(Uuid::new_v4());
        let err = plan_transition(&record, &stranger, ApprovalAction::Cancel, None, None, at("2024-06-01 10:00"))
            .unwrap_err();
        assert!(matches!(err, ApprovalError::UnauthorizedRole { .. }));

        let owner = Actor::coordinator(record.submitted_by);
        let plan = plan_transition(&record, &owner, ApprovalAction::Cancel, None, None, at("2024-06-01 10:00"))
            .unwrap();
        assert_eq!(plan.next.status, EventStatus::Cancelled);
        assert_eq!(
            plan.notifications[0].recipient,
            Recipient::Role(ActorRole::Hod)
        );
    }

    #[test]
    fn test_resubmission_applies_edits_and_resets_the_chain() {
        let mut record = pending_hod();
        record.status = EventStatus::ReturnedToCoordinator;
        record.hod_approval_at = Some(at("2024-05-02 09:00"));
        record.remarks = Some("Shorten the slot".to_string());

        let changes = EventChanges {
            title: Some("Hackathon, day one".to_string()),
            schedule: Some(window("2024-07-01", None, "14:00", "15:00")),
            ..Default::default()
        };
        let owner = Actor::coordinator(record.submitted_by);
        let plan = plan_transition(
            &record,
            &owner,
            ApprovalAction::Resubmit,
            Some("Slot shortened".to_string()),
            Some(&changes),
            at("2024-06-01 10:00"),
        )
        .unwrap();

        assert_eq!(plan.next.status, EventStatus::Resubmitted);
        assert_eq!(plan.next.title, "Hackathon, day one");
        assert_eq!(plan.next.schedule.end_time, window("2024-07-01", None, "14:00", "15:00").end_time);
        assert_eq!(plan.next.hod_approval_at, None);
        assert_eq!(plan.next.remarks, None);
        assert_eq!(plan.history.remarks.as_deref(), Some("Slot shortened"));
        assert!(plan.venue_check);
        assert_eq!(
            plan.notifications[0].recipient,
            Recipient::Role(ActorRole::Hod)
        );
    }

    #[test]
    fn test_resubmission_rejects_invalid_edits() {
        let mut record = pending_hod();
        record.status = EventStatus::ReturnedToCoordinator;
        let owner = Actor::coordinator(record.submitted_by);
        let changes = EventChanges {
            venue: Some(VenueRef::Other("  ".to_string())),
            ..Default::default()
        };
        let err = plan_transition(
            &record,
            &owner,
            ApprovalAction::Resubmit,
            None,
            Some(&changes),
            at("2024-06-01 10:00"),
        )
        .unwrap_err();
        assert!(matches!(err, ApprovalError::ValidationError(_)));
    }

    #[test]
    fn test_resubmission_without_edits_keeps_the_proposal() {
        let mut record = pending_hod();
        record.status = EventStatus::ReturnedToCoordinator;
        let owner = Actor::coordinator(record.submitted_by);
        let changes = EventChanges::default();
        assert!(changes.is_empty());

        let plan = plan_transition(
            &record,
            &owner,
            ApprovalAction::Resubmit,
            None,
            Some(&changes),
            at("2024-06-01 10:00"),
        )
        .unwrap();
        assert_eq!(plan.next.status, EventStatus::Resubmitted);
        assert_eq!(plan.next.title, record.title);
        assert_eq!(plan.next.venue, record.venue);
        assert_eq!(plan.next.schedule, record.schedule);
        assert_eq!(plan.next.description, record.description);
    }

    #[test]
    fn test_other_venue_skips_the_conflict_check() {
        let mut record = pending_hod();
        record.venue = VenueRef::Other("College lawn".to_string());
        let plan = plan_transition(&record, &hod(), ApprovalAction::Approve, None, None, at("2024-06-01 10:00"))
            .unwrap();
        assert!(!plan.venue_check);
    }

    #[test]
    fn test_principal_revocation_reverts_to_pending_dean() {
        let mut record = pending_hod();
        record.status = EventStatus::Approved;
        record.hod_approval_at = Some(at("2024-05-02 09:00"));
        record.dean_approval_at = Some(at("2024-05-03 09:00"));
        record.principal_approval_at = Some(at("2024-05-04 09:00"));

        let principal = Actor::principal(Uuid::new_v4());
        let plan = plan_revocation(&record, &principal, at("2024-06-30 18:00"), date("2024-06-30")).unwrap();

        assert_eq!(plan.next.status, EventStatus::PendingDean);
        assert_eq!(plan.next.principal_approval_at, None);
        assert_eq!(plan.next.dean_approval_at, record.dean_approval_at);
        assert_eq!(plan.next.hod_approval_at, record.hod_approval_at);
        assert_eq!(
            plan.history.remarks.as_deref(),
            Some("Principal approval revoked; event reverted to pending_dean")
        );
        let recipients: Vec<_> = plan.notifications.iter().map(|n| n.recipient).collect();
        assert_eq!(
            recipients,
            vec![
                Recipient::Actor(record.submitted_by),
                Recipient::Role(ActorRole::Dean)
            ]
        );
    }

    #[test]
    fn test_hod_revocation_clears_every_stage() {
        let mut record = pending_hod();
        record.status = EventStatus::PendingPrincipal;
        record.hod_approval_at = Some(at("2024-05-02 09:00"));
        record.dean_approval_at = Some(at("2024-05-03 09:00"));

        let plan = plan_revocation(&record, &hod(), at("2024-06-01 10:00"), date("2024-06-01")).unwrap();
        assert_eq!(plan.next.status, EventStatus::PendingHod);
        for stage in [ApprovalStage::Hod, ApprovalStage::Dean, ApprovalStage::Principal] {
            assert_eq!(plan.next.approval_at(stage), None);
        }
    }

    #[test]
    fn test_revocation_window_closes_on_the_start_date() {
        let mut record = pending_hod();
        record.status = EventStatus::PendingDean;
        record.hod_approval_at = Some(at("2024-05-02 09:00"));

        let err = plan_revocation(&record, &hod(), at("2024-07-01 00:00"), date("2024-07-01")).unwrap_err();
        assert_eq!(
            err,
            ApprovalError::RevocationWindowClosed {
                start_date: record.schedule.start_date
            }
        );
        assert!(plan_revocation(&record, &hod(), at("2024-06-30 23:59"), date("2024-06-30")).is_ok());
    }

    #[test]
    fn test_revocation_window_follows_the_local_date() {
        let mut record = pending_hod();
        record.status = EventStatus::PendingDean;
        record.hod_approval_at = Some(at("2024-05-02 09:00"));

        // Still 30 June in UTC, already the start date locally.
        let err = plan_revocation(&record, &hod(), at("2024-06-30 20:00"), date("2024-07-01")).unwrap_err();
        assert!(matches!(err, ApprovalError::RevocationWindowClosed { .. }));
    }

    #[test]
    fn test_revocation_validation_order() {
        let mut record = pending_hod();
        record.status = EventStatus::Rejected;
        record.hod_approval_at = Some(at("2024-05-02 09:00"));
        let late = at("2024-08-01 10:00");

        let coordinator = Actor::coordinator(record.submitted_by);
        assert!(matches!(
            plan_revocation(&record, &coordinator, late, late.date_naive()).unwrap_err(),
            ApprovalError::UnauthorizedRole { .. }
        ));
        assert!(matches!(
            plan_revocation(&record, &hod(), late, late.date_naive()).unwrap_err(),
            ApprovalError::InvalidTransition { .. }
        ));

        record.status = EventStatus::PendingPrincipal;
        let dean = Actor::dean(Uuid::new_v4());
        assert!(matches!(
            plan_revocation(&record, &dean, late, late.date_naive()).unwrap_err(),
            ApprovalError::InvalidTransition { .. }
        ));
        assert!(matches!(
            plan_revocation(&record, &hod(), late, late.date_naive()).unwrap_err(),
            ApprovalError::RevocationWindowClosed { .. }
        ));
    }

    #[test]
    fn test_transition_forwards_revoke() {
        let mut record = pending_hod();
        record.status = EventStatus::PendingDean;
        record.hod_approval_at = Some(at("2024-05-02 09:00"));
        let plan = plan_transition(&record, &hod(), ApprovalAction::Revoke, None, None, at("2024-06-01 10:00"))
            .unwrap();
        assert_eq!(plan.next.status, EventStatus::PendingHod);
    }
}
