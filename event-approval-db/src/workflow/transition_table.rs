use event_approval_api::{ActorRole, ApprovalAction, ApprovalStage, EventStatus};

const HOD_SOURCES: &[EventStatus] = &[
    EventStatus::PendingHod,
    EventStatus::ReturnedToHod,
    EventStatus::Resubmitted,
];
const DEAN_SOURCES: &[EventStatus] = &[EventStatus::PendingDean, EventStatus::ReturnedToDean];
const PRINCIPAL_SOURCES: &[EventStatus] = &[EventStatus::PendingPrincipal];
const RESUBMIT_SOURCES: &[EventStatus] = &[EventStatus::ReturnedToCoordinator];
const CANCEL_SOURCES: &[EventStatus] = &EventStatus::NON_TERMINAL;

/// One row of the role-gated transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub role: ActorRole,
    pub action: ApprovalAction,
    pub sources: &'static [EventStatus],
    pub target: EventStatus,
    /// Approval stage whose timestamp this transition sets.
    pub stamps: Option<ApprovalStage>,
}

impl TransitionRule {
    pub fn accepts(&self, status: EventStatus) -> bool {
        self.sources.contains(&status)
    }

    pub fn requires_remarks(&self) -> bool {
        self.action.requires_remarks()
    }

    /// Coordinator rows are restricted to the event's own submitter.
    pub fn owner_only(&self) -> bool {
        self.role == ActorRole::Coordinator
    }

    /// Whether the target state claims the venue window and so must pass the conflict check.
    pub fn enters_reserved_slot(&self) -> bool {
        matches!(self.action, ApprovalAction::Approve | ApprovalAction::Resubmit)
    }
}

/// Looks up the row for `role` performing `action`.
///
/// `None` means the role may not perform the action from any state. Revocation and
/// creation are not table-driven and always yield `None`.
pub fn rule_for(role: ActorRole, action: ApprovalAction) -> Option<TransitionRule> {
    use ActorRole::{Coordinator, Dean, Hod, Principal};
    use ApprovalAction::{Approve, Cancel, Create, Reject, Resubmit, Return, Revoke};

    let (sources, target, stamps): (&'static [EventStatus], EventStatus, Option<ApprovalStage>) =
        match (role, action) {
            (Hod, Approve) => (HOD_SOURCES, EventStatus::PendingDean, Some(ApprovalStage::Hod)),
            (Hod, Reject) => (HOD_SOURCES, EventStatus::Rejected, None),
            (Hod, Return) => (HOD_SOURCES, EventStatus::ReturnedToCoordinator, None),
            (Dean, Approve) => (
                DEAN_SOURCES,
                EventStatus::PendingPrincipal,
                Some(ApprovalStage::Dean),
            ),
            (Dean, Reject) => (DEAN_SOURCES, EventStatus::Rejected, None),
            (Dean, Return) => (DEAN_SOURCES, EventStatus::ReturnedToHod, None),
            (Principal, Approve) => (
                PRINCIPAL_SOURCES,
                EventStatus::Approved,
                Some(ApprovalStage::Principal),
            ),
            (Principal, Reject) => (PRINCIPAL_SOURCES, EventStatus::Rejected, None),
            (Principal, Return) => (PRINCIPAL_SOURCES, EventStatus::ReturnedToDean, None),
            (Coordinator, Resubmit) => (RESUBMIT_SOURCES, EventStatus::Resubmitted, None),
            (Coordinator, Cancel) => (CANCEL_SOURCES, EventStatus::Cancelled, None),
            (Coordinator, Approve | Reject | Return)
            | (Hod | Dean | Principal, Resubmit | Cancel)
            | (_, Create | Revoke) => return None,
        };

    Some(TransitionRule {
        role,
        action,
        sources,
        target,
        stamps,
    })
}
