//! Render snapshots of the notification stack.
//!
//! A [`StackView`] is an immutable picture of what the stack looks like
//! right now: every tracked toast with its content, phase, and countdown
//! progress. Renderers consume snapshots and never touch lifecycle state
//! directly.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::config::Position;
use crate::domain::{NotificationAction, NotificationId, NotificationKind};
use crate::lifecycle::AnimationPhase;

/// Render state of one toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastView {
    /// Notification id, for hit-testing dismiss/hover/action targets.
    pub id: NotificationId,
    /// Notification kind, for theme lookup.
    pub kind: NotificationKind,
    /// Title text.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// Action buttons.
    pub actions: Vec<NotificationAction>,
    /// When the notification was created ("2 minutes ago" labels).
    pub created_at: DateTime<Utc>,
    /// Whether a close affordance should be shown.
    pub dismissible: bool,
    /// Current animation phase.
    pub phase: AnimationPhase,
    /// Whether the countdown is paused (hover).
    pub paused: bool,
    /// Countdown budget left, for progress indicators. `None` for
    /// persistent toasts.
    pub remaining: Option<Duration>,
}

/// Render state of the whole stack.
#[derive(Debug, Clone, PartialEq)]
pub struct StackView {
    /// Configured screen placement.
    pub position: Position,
    /// Tracked toasts in admission order, oldest first.
    pub toasts: Vec<ToastView>,
}

impl StackView {
    /// Toast order for rendering top to bottom as a vertical column at
    /// the configured position, newest nearest the anchored edge.
    pub fn display_order(&self) -> Vec<&ToastView> {
        if self.position.is_top_anchored() {
            self.toasts.iter().rev().collect()
        } else {
            self.toasts.iter().collect()
        }
    }

    /// Returns true when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
