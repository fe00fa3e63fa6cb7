use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation an actor requests on an event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    Create,
    Approve,
    Reject,
    Return,
    Resubmit,
    Cancel,
    Revoke,
}

impl ApprovalAction {
    pub fn requires_remarks(self) -> bool {
        matches!(self, ApprovalAction::Reject | ApprovalAction::Return)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalAction::Create => "create",
            ApprovalAction::Approve => "approve",
            ApprovalAction::Reject => "reject",
            ApprovalAction::Return => "return",
            ApprovalAction::Resubmit => "resubmit",
            ApprovalAction::Cancel => "cancel",
            ApprovalAction::Revoke => "revoke",
        }
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
