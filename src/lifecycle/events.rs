//! Lifecycle events emitted by the notification stack.
//!
//! Events report phase transitions to the host: admissions, settling,
//! exit starts, and removals. `Dismissed` is the host's cue to drop the
//! record from its source-of-truth list.

use crate::domain::NotificationId;

/// Why a notification left the stack (or began leaving).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The auto-dismiss countdown elapsed.
    Expired,
    /// The user closed it.
    Manual,
    /// The caller stopped supplying the record.
    Withdrawn,
    /// The capacity policy forced it out.
    Evicted,
}

/// Event emitted by the notification stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    /// A record was admitted and its entry transition started.
    Entered(NotificationId),
    /// An entering notification settled into full visibility.
    Settled(NotificationId),
    /// A notification began its exit transition.
    ExitStarted {
        id: NotificationId,
        reason: DismissReason,
    },
    /// A notification finished its exit transition and was removed.
    /// Emitted exactly once per tracked id.
    Dismissed {
        id: NotificationId,
        reason: DismissReason,
    },
    /// An action button was invoked on a tracked notification.
    ActionInvoked {
        id: NotificationId,
        action_id: String,
    },
}

impl StackEvent {
    /// Returns the notification id this event concerns.
    pub fn id(&self) -> &NotificationId {
        match self {
            StackEvent::Entered(id) => id,
            StackEvent::Settled(id) => id,
            StackEvent::ExitStarted { id, .. } => id,
            StackEvent::Dismissed { id, .. } => id,
            StackEvent::ActionInvoked { id, .. } => id,
        }
    }
}
