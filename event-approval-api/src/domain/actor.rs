use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role an authenticated actor holds in the approval chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "actor_role", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Coordinator,
    Hod,
    Dean,
    Principal,
}

impl ActorRole {
    /// The sign-off stage this role owns, if it is an approver.
    pub fn approval_stage(self) -> Option<ApprovalStage> {
        match self {
            ActorRole::Coordinator => None,
            ActorRole::Hod => Some(ApprovalStage::Hod),
            ActorRole::Dean => Some(ApprovalStage::Dean),
            ActorRole::Principal => Some(ApprovalStage::Principal),
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorRole::Coordinator => f.write_str("Coordinator"),
            ActorRole::Hod => f.write_str("HOD"),
            ActorRole::Dean => f.write_str("Dean"),
            ActorRole::Principal => f.write_str("Principal"),
        }
    }
}

/// One of the three serial sign-offs an event collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApprovalStage {
    Hod,
    Dean,
    Principal,
}

impl ApprovalStage {
    pub fn role(self) -> ActorRole {
        match self {
            ApprovalStage::Hod => ActorRole::Hod,
            ApprovalStage::Dean => ActorRole::Dean,
            ApprovalStage::Principal => ActorRole::Principal,
        }
    }
}

impl fmt::Display for ApprovalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.role(), f)
    }
}

/// Identity supplied by the session layer for every core call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: Uuid, role: ActorRole) -> Self {
        Self { id, role }
    }

    pub fn coordinator(id: Uuid) -> Self {
        Self::new(id, ActorRole::Coordinator)
    }

    pub fn hod(id: Uuid) -> Self {
        Self::new(id, ActorRole::Hod)
    }

    pub fn dean(id: Uuid) -> Self {
        Self::new(id, ActorRole::Dean)
    }

    pub fn principal(id: Uuid) -> Self {
        Self::new(id, ActorRole::Principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_and_role_round_trip() {
        for role in [ActorRole::Hod, ActorRole::Dean, ActorRole::Principal] {
            let stage = role.approval_stage().unwrap();
            assert_eq!(stage.role(), role);
        }
        assert_eq!(ActorRole::Coordinator.approval_stage(), None);
    }

    #[test]
    fn test_stages_are_ordered_along_the_chain() {
        assert!(ApprovalStage::Hod < ApprovalStage::Dean);
        assert!(ApprovalStage::Dean < ApprovalStage::Principal);
    }
}
