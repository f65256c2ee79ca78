//! Domain layer types for the herald notification system.
//!
//! This module contains the core data types used throughout the crate:
//! the notification record supplied by callers and the identifier it is
//! tracked by.

mod record;
mod types;

pub use record::{ActionStyle, NotificationAction, NotificationKind, NotificationRecord};
pub use types::NotificationId;
