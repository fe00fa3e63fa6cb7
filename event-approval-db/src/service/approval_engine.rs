use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use event_approval_api::{
    Actor, ActorRole, ApiResult, ApprovalAction, ApprovalError, ApprovalService, Clock,
    CreateEventRequest, EventChanges, EventRecord, EventStatus, HistoryEntry, Notification,
    NotificationTrigger, ScheduleWindow, SystemClock, TracingNotifier, VenueRef,
};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::repository::approval_store::{ApprovalStore, ApprovalUnitOfWork};
use crate::repository::pagination::{Page, PageRequest};
use crate::service::config::EngineConfig;
use crate::workflow::{
    creation_notifications, find_conflict, is_available, normalize_remarks, plan_revocation,
    plan_transition, TransitionPlan,
};

/// [`ApprovalService`] over any [`ApprovalStore`].
///
/// Each accepted action runs as one unit of work: load, validate, conflict check,
/// versioned write, history append, commit. Notifications go out after commit.
pub struct ApprovalEngine<S: ApprovalStore> {
    store: Arc<S>,
    notifier: Arc<dyn NotificationTrigger>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl<S: ApprovalStore> ApprovalEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            notifier: Arc::new(TracingNotifier),
            clock: Arc::new(SystemClock),
            config: EngineConfig::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationTrigger>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// One page of an event's history, oldest first.
    pub async fn get_history_page(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry>> {
        self.require_event(event_id).await?;
        self.store.load_history_page(event_id, page).await
    }

    /// Storage keeps microseconds; truncating here keeps hashes stable across a round trip.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }

    async fn require_event(&self, event_id: Uuid) -> ApiResult<EventRecord> {
        self.store
            .load_event(event_id)
            .await?
            .ok_or_else(|| ApprovalError::event_not_found(event_id))
    }

    /// Runs `plan` against fresh state, retrying when the versioned write loses a race.
    async fn commit_plan<F>(&self, event_id: Uuid, plan: F) -> ApiResult<EventRecord>
    where
        F: Fn(&EventRecord, DateTime<Utc>) -> ApiResult<TransitionPlan> + Send + Sync,
    {
        let mut attempt = 0;
        loop {
            match self.try_commit(event_id, &plan).await {
                Ok(committed) => {
                    self.dispatch(&committed.notifications).await;
                    return Ok(committed.next);
                }
                Err(err)
                    if err.is_retryable() && attempt < self.config.concurrent_modification_retries =>
                {
                    attempt += 1;
                    warn!(%event_id, attempt, error = %err, "retrying after concurrent modification");
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_commit<F>(&self, event_id: Uuid, plan: &F) -> ApiResult<TransitionPlan>
    where
        F: Fn(&EventRecord, DateTime<Utc>) -> ApiResult<TransitionPlan> + Send + Sync,
    {
        let mut uow = self.store.begin().await?;
        let current = uow
            .load_event(event_id)
            .await?
            .ok_or_else(|| ApprovalError::event_not_found(event_id))?;

        let planned = plan(&current, self.now())?;
        if planned.venue_check {
            ensure_slot_free::<S>(&mut uow, &planned.next).await?;
        }
        uow.update_event(&planned.next, planned.expected_version)
            .await?;
        uow.append_history(&planned.history).await?;
        uow.commit().await?;

        info!(
            %event_id,
            actor_id = %planned.history.actor_id,
            role = %planned.history.actor_role,
            from = %planned.history.old_status,
            to = %planned.history.new_status,
            "event transition committed"
        );
        Ok(planned)
    }

    /// Best effort: a failed delivery is logged and never undoes the committed change.
    async fn dispatch(&self, notifications: &[Notification]) {
        for notification in notifications {
            if let Err(err) = self.notifier.notify(notification).await {
                warn!(
                    event_id = %notification.event_id,
                    recipient = ?notification.recipient,
                    error = %err,
                    "notification delivery failed"
                );
            }
        }
    }
}

/// Locks the event's venue and fails if another live booking overlaps its window.
async fn ensure_slot_free<S: ApprovalStore>(
    uow: &mut S::UnitOfWork,
    event: &EventRecord,
) -> ApiResult<()> {
    let Some(venue_id) = event.venue.managed_id() else {
        return Ok(());
    };
    uow.lock_venue(venue_id)
        .await?
        .ok_or_else(|| ApprovalError::venue_not_found(venue_id))?;

    let bookings = uow.find_active_bookings(venue_id, Some(event.id)).await?;
    debug!(%venue_id, candidates = bookings.len(), "checking venue conflicts");
    match find_conflict(&event.venue, &event.schedule, Some(event.id), &bookings) {
        Some(conflict) => Err(ApprovalError::VenueUnavailable {
            venue_id,
            conflicting_event_id: conflict.id,
        }),
        None => Ok(()),
    }
}

#[async_trait]
impl<S: ApprovalStore + 'static> ApprovalService for ApprovalEngine<S> {
    async fn create_event(&self, actor: Actor, request: CreateEventRequest) -> ApiResult<Uuid> {
        if actor.role != ActorRole::Coordinator {
            return Err(ApprovalError::UnauthorizedRole {
                role: actor.role,
                action: ApprovalAction::Create,
            });
        }
        request.validate()?;
        let title = request.title.trim();
        if title.is_empty() {
            return Err(ApprovalError::ValidationError(
                "title must not be empty".to_string(),
            ));
        }
        request.venue.validate()?;
        request.schedule.validate()?;

        let now = self.now();
        let record = EventRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: normalize_remarks(request.description),
            status: EventStatus::PendingHod,
            venue: request.venue,
            schedule: request.schedule,
            submitted_by: actor.id,
            hod_approval_at: None,
            dean_approval_at: None,
            principal_approval_at: None,
            remarks: None,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        let mut uow = self.store.begin().await?;
        ensure_slot_free::<S>(&mut uow, &record).await?;
        uow.insert_event(&record).await?;
        uow.commit().await?;

        info!(event_id = %record.id, actor_id = %actor.id, "event created");
        self.dispatch(&creation_notifications(&record)).await;
        Ok(record.id)
    }

    async fn transition(
        &self,
        event_id: Uuid,
        actor: Actor,
        action: ApprovalAction,
        remarks: Option<String>,
    ) -> ApiResult<EventRecord> {
        match action {
            ApprovalAction::Revoke => self.revoke(event_id, actor).await,
            ApprovalAction::Create => Err(ApprovalError::InvalidTransition {
                status: self.require_event(event_id).await?.status,
                action,
            }),
            _ => {
                self.commit_plan(event_id, |event, now| {
                    plan_transition(event, &actor, action, remarks.clone(), None, now)
                })
                .await
            }
        }
    }

    async fn resubmit(
        &self,
        event_id: Uuid,
        actor: Actor,
        changes: EventChanges,
        remarks: Option<String>,
    ) -> ApiResult<EventRecord> {
        if changes.is_empty() {
            debug!(%event_id, "resubmitted without edits");
        }
        self.commit_plan(event_id, |event, now| {
            plan_transition(
                event,
                &actor,
                ApprovalAction::Resubmit,
                remarks.clone(),
                Some(&changes),
                now,
            )
        })
        .await
    }

    async fn revoke(&self, event_id: Uuid, actor: Actor) -> ApiResult<EventRecord> {
        let clock = &self.clock;
        self.commit_plan(event_id, |event, now| {
            plan_revocation(event, &actor, now, clock.today())
        })
        .await
    }

    async fn cancel(&self, event_id: Uuid, actor: Actor) -> ApiResult<EventRecord> {
        self.transition(event_id, actor, ApprovalAction::Cancel, None)
            .await
    }

    async fn get_event(&self, event_id: Uuid) -> ApiResult<EventRecord> {
        self.require_event(event_id).await
    }

    async fn get_history(&self, event_id: Uuid) -> ApiResult<Vec<HistoryEntry>> {
        self.require_event(event_id).await?;
        self.store.load_history(event_id).await
    }

    async fn is_venue_available(
        &self,
        venue: &VenueRef,
        schedule: &ScheduleWindow,
        exclude_event_id: Option<Uuid>,
    ) -> ApiResult<bool> {
        venue.validate()?;
        schedule.validate()?;
        let Some(venue_id) = venue.managed_id() else {
            return Ok(true);
        };
        self.store
            .load_venue(venue_id)
            .await?
            .ok_or_else(|| ApprovalError::venue_not_found(venue_id))?;
        let bookings = self
            .store
            .find_active_bookings(venue_id, exclude_event_id)
            .await?;
        Ok(is_available(venue, schedule, exclude_event_id, &bookings))
    }
}
