use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Actor, ApprovalAction, CreateEventRequest, EventChanges, EventRecord, HistoryEntry,
    ScheduleWindow, VenueRef,
};
use crate::error::ApiResult;

/// Call contract the UI/API layer uses to drive the approval chain.
///
/// Every method receives the authenticated actor explicitly; implementations keep no
/// ambient session state.
#[async_trait]
pub trait ApprovalService: Send + Sync {
    /// Create a proposal in `pending_hod`. Fails with `VenueUnavailable` when the managed
    /// venue is already reserved for an overlapping window.
    async fn create_event(&self, actor: Actor, request: CreateEventRequest) -> ApiResult<Uuid>;

    /// Apply one row of the transition table (approve, reject, return, resubmit, cancel).
    /// `Revoke` is forwarded to [`ApprovalService::revoke`].
    async fn transition(
        &self,
        event_id: Uuid,
        actor: Actor,
        action: ApprovalAction,
        remarks: Option<String>,
    ) -> ApiResult<EventRecord>;

    /// Edit and resubmit a returned proposal.
    async fn resubmit(
        &self,
        event_id: Uuid,
        actor: Actor,
        changes: EventChanges,
        remarks: Option<String>,
    ) -> ApiResult<EventRecord>;

    /// Retract the caller's own sign-off before the event starts.
    async fn revoke(&self, event_id: Uuid, actor: Actor) -> ApiResult<EventRecord>;

    /// Withdraw a non-terminal proposal. Only the submitting coordinator may cancel.
    async fn cancel(&self, event_id: Uuid, actor: Actor) -> ApiResult<EventRecord>;

    async fn get_event(&self, event_id: Uuid) -> ApiResult<EventRecord>;

    /// Full transition history of an event, oldest first. Never mutates state.
    async fn get_history(&self, event_id: Uuid) -> ApiResult<Vec<HistoryEntry>>;

    async fn is_venue_available(
        &self,
        venue: &VenueRef,
        schedule: &ScheduleWindow,
        exclude_event_id: Option<Uuid>,
    ) -> ApiResult<bool>;
}
