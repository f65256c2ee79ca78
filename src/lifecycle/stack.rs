//! Reconciling notification stack.
//!
//! The [`NotificationStack`] owns every tracked notification cell and is
//! the sole authority over animation phases. It is a pure reducer: callers
//! push the full desired record list through [`reconcile`], the runtime
//! fires due deadlines through [`advance`], and both return the lifecycle
//! events they produced. No operation blocks or reads the clock itself.
//!
//! Responsibilities:
//! - Diff the desired list against tracked state (admit / keep / withdraw)
//! - Enforce the maximum visible count by evicting the newest overflow
//! - Choreograph removal so every cell passes through the exiting phase
//! - Report the earliest pending deadline for the runtime to sleep on
//!
//! [`reconcile`]: NotificationStack::reconcile
//! [`advance`]: NotificationStack::advance

use std::collections::HashSet;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::config::{SettingsError, StackSettings};
use crate::domain::{NotificationId, NotificationRecord};
use crate::ui::{StackView, ToastView};

use super::cell::NotificationCell;
use super::events::{DismissReason, StackEvent};

/// Errors from stack reconciliation.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The same id appeared twice in one desired list.
    #[error("Duplicate notification id in batch: {0}")]
    DuplicateId(NotificationId),
}

/// Animation phase of a tracked notification, derived and owned by the
/// stack. Entering and visible cells occupy capacity; exiting cells are
/// already leaving and do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// Just admitted; the entry transition is playing.
    Entering,
    /// Fully shown.
    Visible,
    /// The exit transition is playing; removal is scheduled.
    Exiting,
}

/// A cell tracked by the stack, tagged with its phase and any pending
/// phase deadlines.
#[derive(Debug)]
struct TrackedCell {
    cell: NotificationCell,
    phase: AnimationPhase,
    /// Pending promotion to `Visible`, set while entering.
    settle_at: Option<Instant>,
    /// Pending removal deadline and the reason that started the exit.
    exit: Option<(Instant, DismissReason)>,
}

impl TrackedCell {
    fn admitted(record: NotificationRecord, now: Instant, settle_delay: Duration) -> Self {
        Self {
            cell: NotificationCell::new(record, now),
            phase: AnimationPhase::Entering,
            settle_at: Some(now + settle_delay),
            exit: None,
        }
    }

    fn id(&self) -> &NotificationId {
        &self.cell.record().id
    }

    fn is_exiting(&self) -> bool {
        self.phase == AnimationPhase::Exiting
    }

    /// Flips to the exiting phase and schedules removal. The settle
    /// deadline is dropped; an entering cell exits without ever settling.
    fn begin_exit(
        &mut self,
        reason: DismissReason,
        now: Instant,
        exit_transition: Duration,
    ) -> StackEvent {
        self.phase = AnimationPhase::Exiting;
        self.settle_at = None;
        self.exit = Some((now + exit_transition, reason));
        StackEvent::ExitStarted {
            id: self.id().clone(),
            reason,
        }
    }

    /// The earliest deadline this cell is waiting on, if any.
    fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            AnimationPhase::Exiting => self.exit.map(|(at, _)| at),
            _ => match (self.settle_at, self.cell.deadline()) {
                (Some(settle), Some(countdown)) => Some(settle.min(countdown)),
                (Some(settle), None) => Some(settle),
                (None, countdown) => countdown,
            },
        }
    }

    fn toast_view(&self, now: Instant) -> ToastView {
        let record = self.cell.record();
        ToastView {
            id: record.id.clone(),
            kind: record.kind,
            title: record.title.clone(),
            body: record.body.clone(),
            actions: record.actions.clone(),
            created_at: record.created_at,
            dismissible: record.dismissible,
            phase: self.phase,
            paused: self.cell.is_paused(),
            remaining: self.cell.remaining(now),
        }
    }
}

/// Orchestrates tracked notifications for one screen position.
///
/// Cells are kept in admission order; newly admitted records append
/// without reordering existing ones. All mutating operations take an
/// explicit `now` and return the events they produced, in order.
#[derive(Debug)]
pub struct NotificationStack {
    settings: StackSettings,
    entries: Vec<TrackedCell>,
}

impl NotificationStack {
    /// Creates a stack with the given settings.
    pub fn new(settings: StackSettings) -> std::result::Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            entries: Vec::new(),
        })
    }

    /// Reconciles the caller's full desired list against tracked state.
    ///
    /// A duplicate id within `records` rejects the whole call with no
    /// state change. Otherwise:
    /// - ids not yet tracked are admitted as entering cells
    /// - tracked ids missing from `records` begin their exit (withdrawn)
    /// - ids present in both keep their cell, countdown, and phase; only
    ///   the displayed content is refreshed
    /// - if non-exiting cells then exceed `max_visible`, the excess is
    ///   evicted from the most recently admitted end
    ///
    /// Removal never happens here; an exiting cell is dropped by a later
    /// [`advance`](Self::advance) once its exit transition has run.
    pub fn reconcile(
        &mut self,
        records: &[NotificationRecord],
        now: Instant,
    ) -> std::result::Result<Vec<StackEvent>, ReconcileError> {
        Self::validate_batch(records)?;
        let next_ids: HashSet<&NotificationId> = records.iter().map(|r| &r.id).collect();

        let exit_transition = self.settings.exit_transition;
        let mut events = Vec::new();

        // Withdrawals: tracked ids the caller no longer wants.
        for entry in &mut self.entries {
            if !entry.is_exiting() && !next_ids.contains(entry.id()) {
                events.push(entry.begin_exit(DismissReason::Withdrawn, now, exit_transition));
            }
        }

        // Admissions and content refreshes, in the caller's order.
        for record in records {
            match self.entries.iter().position(|e| e.id() == &record.id) {
                Some(index) => {
                    let entry = &mut self.entries[index];
                    if !entry.is_exiting() {
                        entry.cell.refresh_record(record.clone());
                    }
                }
                None => {
                    events.push(StackEvent::Entered(record.id.clone()));
                    self.entries.push(TrackedCell::admitted(
                        record.clone(),
                        now,
                        self.settings.settle_delay,
                    ));
                }
            }
        }

        // Capacity: evict the newest overflow, oldest cells keep their slot.
        let active: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_exiting())
            .map(|(index, _)| index)
            .collect();
        if active.len() > self.settings.max_visible {
            let excess = active.len() - self.settings.max_visible;
            for &index in active.iter().rev().take(excess) {
                let entry = &mut self.entries[index];
                tracing::debug!(id = %entry.id(), "Capacity exceeded, evicting");
                events.push(entry.begin_exit(DismissReason::Evicted, now, exit_transition));
            }
        }

        Ok(events)
    }

    /// Checks a desired list for duplicate ids without applying it.
    ///
    /// [`reconcile`](Self::reconcile) runs this itself; the runtime also
    /// calls it so a bad batch is rejected on the caller's thread before
    /// anything is enqueued.
    pub fn validate_batch(
        records: &[NotificationRecord],
    ) -> std::result::Result<(), ReconcileError> {
        let mut seen: HashSet<&NotificationId> = HashSet::with_capacity(records.len());
        for record in records {
            if !seen.insert(&record.id) {
                return Err(ReconcileError::DuplicateId(record.id.clone()));
            }
        }
        Ok(())
    }

    /// Fires every transition due at or before `now`.
    ///
    /// Entering cells whose settle delay passed become visible, running
    /// countdowns that reached their deadline begin exiting, and exiting
    /// cells whose transition finished are removed. `Dismissed` is the
    /// final event for an id; the entry is gone once it is emitted.
    pub fn advance(&mut self, now: Instant) -> Vec<StackEvent> {
        let exit_transition = self.settings.exit_transition;
        let mut events = Vec::new();

        for entry in &mut self.entries {
            if entry.phase == AnimationPhase::Entering
                && matches!(entry.settle_at, Some(at) if at <= now)
            {
                entry.phase = AnimationPhase::Visible;
                entry.settle_at = None;
                events.push(StackEvent::Settled(entry.id().clone()));
            }
        }

        for entry in &mut self.entries {
            if !entry.is_exiting() && entry.cell.poll_expiry(now) {
                events.push(entry.begin_exit(DismissReason::Expired, now, exit_transition));
            }
        }

        let mut index = 0;
        while index < self.entries.len() {
            match self.entries[index].exit {
                Some((at, reason)) if at <= now => {
                    let entry = self.entries.remove(index);
                    tracing::debug!(id = %entry.id(), ?reason, "Notification removed");
                    events.push(StackEvent::Dismissed {
                        id: entry.id().clone(),
                        reason,
                    });
                }
                _ => index += 1,
            }
        }

        events
    }

    /// Dismisses a notification manually.
    ///
    /// Returns `None` with no state change when the id is unknown,
    /// already exiting, or not dismissible.
    pub fn dismiss(&mut self, id: &NotificationId, now: Instant) -> Option<StackEvent> {
        let exit_transition = self.settings.exit_transition;
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id() == id && !e.is_exiting())?;
        if !entry.cell.dismiss_now() {
            tracing::debug!(%id, "Dismiss rejected, notification is not dismissible");
            return None;
        }
        Some(entry.begin_exit(DismissReason::Manual, now, exit_transition))
    }

    /// Forces every non-exiting notification to start exiting, including
    /// non-dismissible ones. This is the host's bulk clear, with the same
    /// authority as reconciling to an empty list.
    pub fn dismiss_all(&mut self, now: Instant) -> Vec<StackEvent> {
        let exit_transition = self.settings.exit_transition;
        let mut events = Vec::new();
        for entry in &mut self.entries {
            if !entry.is_exiting() {
                events.push(entry.begin_exit(DismissReason::Manual, now, exit_transition));
            }
        }
        events
    }

    /// Pauses the countdown of a tracked notification (pointer hover).
    /// Returns false when there was nothing to pause.
    pub fn pause(&mut self, id: &NotificationId, now: Instant) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| e.id() == id && !e.is_exiting())
        {
            Some(entry) => entry.cell.pause(now),
            None => false,
        }
    }

    /// Resumes a paused countdown. Returns false when there was nothing
    /// to resume.
    pub fn resume(&mut self, id: &NotificationId, now: Instant) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| e.id() == id && !e.is_exiting())
        {
            Some(entry) => entry.cell.resume(now),
            None => false,
        }
    }

    /// Routes an action invocation to the host as an event.
    ///
    /// Returns `None` when the id is unknown, exiting, or carries no
    /// action with the given id. No lifecycle transition happens; whether
    /// the action closes the toast is the host's call.
    pub fn invoke_action(&self, id: &NotificationId, action_id: &str) -> Option<StackEvent> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id() == id && !e.is_exiting())?;
        if !entry.cell.record().actions.iter().any(|a| a.id == action_id) {
            return None;
        }
        Some(StackEvent::ActionInvoked {
            id: id.clone(),
            action_id: action_id.to_string(),
        })
    }

    /// Returns the earliest deadline any cell is waiting on, or `None`
    /// when the stack is idle (empty, or only persistent/paused cells).
    pub fn next_wake(&self) -> Option<Instant> {
        self.entries.iter().filter_map(|e| e.next_deadline()).min()
    }

    /// Builds a render snapshot of the current stack.
    pub fn view(&self, now: Instant) -> StackView {
        StackView {
            position: self.settings.position,
            toasts: self
                .entries
                .iter()
                .map(|entry| entry.toast_view(now))
                .collect(),
        }
    }

    /// Returns the phase of a tracked notification.
    pub fn phase_of(&self, id: &NotificationId) -> Option<AnimationPhase> {
        self.entries
            .iter()
            .find(|e| e.id() == id)
            .map(|e| e.phase)
    }

    /// Returns the number of tracked notifications, exiting included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of notifications occupying visible slots.
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_exiting()).count()
    }

    /// Returns the stack settings.
    pub fn settings(&self) -> &StackSettings {
        &self.settings
    }
}
