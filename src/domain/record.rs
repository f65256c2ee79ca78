//! Notification records: the caller-owned description of one toast.
//!
//! A record is immutable input to the lifecycle stack. It carries:
//! - What to show (kind, title, optional body, action buttons)
//! - How long to show it (`duration`, `None` = until dismissed)
//! - Whether the user may close it manually (`dismissible`)
//!
//! Records are diffed by [`NotificationId`]; all other fields are content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::NotificationId;

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Success notification (green).
    Success,
    /// Error notification (red).
    Error,
    /// Warning notification (yellow).
    Warning,
    /// Informational notification (blue).
    Info,
}

impl NotificationKind {
    /// Returns the default auto-dismiss duration for this kind.
    ///
    /// Errors stay until the user closes them; everything else clears
    /// itself after a few seconds.
    pub fn default_duration(&self) -> Option<Duration> {
        match self {
            NotificationKind::Error => None,
            NotificationKind::Warning => Some(Duration::from_secs(8)),
            NotificationKind::Success | NotificationKind::Info => Some(Duration::from_secs(5)),
        }
    }
}

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStyle {
    /// Emphasized, at most one per notification by convention.
    Primary,
    /// Default button treatment.
    Secondary,
}

/// An action button on a notification.
///
/// Actions are opaque to the lifecycle stack: invoking one emits an
/// event carrying this id, and the host decides what happens next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Action ID, unique within one notification.
    pub id: String,
    /// Button label.
    pub label: String,
    /// Button treatment.
    pub style: ActionStyle,
}

impl NotificationAction {
    /// Creates a new secondary action.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            style: ActionStyle::Secondary,
        }
    }

    /// Makes this the primary action.
    pub fn primary(mut self) -> Self {
        self.style = ActionStyle::Primary;
        self
    }
}

/// A notification to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Unique ID, stable across re-submissions of the same notification.
    pub id: NotificationId,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Title text.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// Actions.
    pub actions: Vec<NotificationAction>,
    /// When the notification was created (display metadata only).
    pub created_at: DateTime<Utc>,
    /// How long to show (None = manual dismiss only).
    pub duration: Option<Duration>,
    /// Whether the notification can be dismissed by the user.
    pub dismissible: bool,
}

impl NotificationRecord {
    /// Creates a new notification with the kind's default duration.
    pub fn new(
        id: impl Into<NotificationId>,
        kind: NotificationKind,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            body: None,
            actions: Vec::new(),
            created_at: Utc::now(),
            duration: kind.default_duration(),
            dismissible: true,
        }
    }

    /// Creates a success notification.
    pub fn success(id: impl Into<NotificationId>, title: impl Into<String>) -> Self {
        Self::new(id, NotificationKind::Success, title)
    }

    /// Creates an error notification.
    pub fn error(id: impl Into<NotificationId>, title: impl Into<String>) -> Self {
        Self::new(id, NotificationKind::Error, title)
    }

    /// Creates an info notification.
    pub fn info(id: impl Into<NotificationId>, title: impl Into<String>) -> Self {
        Self::new(id, NotificationKind::Info, title)
    }

    /// Creates a warning notification.
    pub fn warning(id: impl Into<NotificationId>, title: impl Into<String>) -> Self {
        Self::new(id, NotificationKind::Warning, title)
    }

    /// Sets the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the duration. A zero duration is normalized to `None`.
    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration.filter(|d| !d.is_zero());
        self
    }

    /// Makes the notification persistent (no auto-dismiss).
    pub fn persistent(self) -> Self {
        self.with_duration(None)
    }

    /// Adds an action.
    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Makes the notification not dismissible by the user.
    pub fn not_dismissible(mut self) -> Self {
        self.dismissible = false;
        self
    }

    /// Returns true if the notification never auto-dismisses.
    pub fn is_persistent(&self) -> bool {
        self.duration.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_builder() {
        let record = NotificationRecord::success("save-1", "Draft saved")
            .with_body("All changes synced")
            .with_action(NotificationAction::new("undo", "Undo").primary());

        assert_eq!(record.id, NotificationId::from("save-1"));
        assert_eq!(record.kind, NotificationKind::Success);
        assert!(record.body.is_some());
        assert_eq!(record.actions.len(), 1);
        assert_eq!(record.actions[0].style, ActionStyle::Primary);
        assert!(record.dismissible);
    }

    #[test]
    fn errors_default_to_persistent() {
        let record = NotificationRecord::error("err-1", "Send failed");
        assert!(record.is_persistent());

        let record = NotificationRecord::info("info-1", "Connected");
        assert_eq!(record.duration, Some(Duration::from_secs(5)));
    }

    #[test]
    fn zero_duration_normalizes_to_persistent() {
        let record = NotificationRecord::info("info-1", "Connected")
            .with_duration(Some(Duration::ZERO));
        assert!(record.is_persistent());
    }

    #[test]
    fn explicit_duration_overrides_default() {
        let record = NotificationRecord::error("err-1", "Send failed")
            .with_duration(Some(Duration::from_secs(30)));
        assert_eq!(record.duration, Some(Duration::from_secs(30)));
    }

    #[test]
    fn record_serialization_roundtrip() {
        let record = NotificationRecord::warning("disk-low", "Disk space low")
            .with_body("Less than 1 GB remaining")
            .not_dismissible();

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: NotificationRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, record);
        assert!(!deserialized.dismissible);
    }
}
