//! Pure approval workflow: no I/O, no clock, no store.
//!
//! The engine loads a record, asks the planner what an action would do to it,
//! and persists the resulting plan.

mod conflict;
mod notifications;
mod planner;
mod revocation;
mod transition_table;


pub use conflict::{dates_overlap, find_conflict, is_available, times_overlap, windows_conflict};
pub use notifications::{awaiting_role, creation_notifications};
pub use planner::{normalize_remarks, plan_revocation, plan_transition, TransitionPlan};
pub use revocation::{revocation_rule, RevocationRule};
pub use transition_table::{rule_for, TransitionRule};
