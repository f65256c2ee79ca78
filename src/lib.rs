//! herald - Toast notification lifecycle management
//!
//! This crate provides the building blocks for transient in-app
//! notifications: the record model, the pure lifecycle state machine,
//! and the async runtime that drives timers and fans out events.

pub mod config;
pub mod domain;
pub mod lifecycle;
pub mod runtime;
pub mod ui;

pub use config::{Position, StackSettings};
pub use domain::{NotificationId, NotificationKind, NotificationRecord};
pub use lifecycle::{AnimationPhase, DismissReason, NotificationStack, StackEvent};
pub use runtime::StackRuntime;
