use event_approval_api::{ApprovalStage, EventStatus};

/// What revoking a stage's sign-off does to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevocationRule {
    pub stage: ApprovalStage,
    pub target: EventStatus,
    pub clears: &'static [ApprovalStage],
}

/// Principal revocation falls back to `pending_dean`, not `pending_principal`.
pub fn revocation_rule(stage: ApprovalStage) -> RevocationRule {
    match stage {
        ApprovalStage::Hod => RevocationRule {
            stage,
            target: EventStatus::PendingHod,
            clears: &[ApprovalStage::Hod, ApprovalStage::Dean, ApprovalStage::Principal],
        },
        ApprovalStage::Dean => RevocationRule {
            stage,
            target: EventStatus::PendingDean,
            clears: &[ApprovalStage::Dean, ApprovalStage::Principal],
        },
        ApprovalStage::Principal => RevocationRule {
            stage,
            target: EventStatus::PendingDean,
            clears: &[ApprovalStage::Principal],
        },
    }
}
