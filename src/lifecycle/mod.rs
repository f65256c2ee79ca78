//! Notification lifecycle layer.
//!
//! This module contains the pure state machines that decide what every
//! notification is doing at any instant. Nothing here reads the clock or
//! blocks; callers pass `now` in and get lifecycle events back.
//!
//! # Architecture
//!
//! The lifecycle layer sits between the caller's record list and the
//! runtime that owns the clock:
//!
//! ```text
//! Caller (desired record list)
//!          |
//!          v
//!   Lifecycle Layer  <-- You are here
//!          |
//!          v
//!  Runtime (clock, channels)
//! ```
//!
//! # Components
//!
//! - [`NotificationCell`]: Countdown state machine for one notification
//! - [`NotificationStack`]: Reconciles the desired list, owns phases,
//!   enforces capacity, and choreographs delayed removal
//! - [`StackEvent`]: What the stack reports back to the host

mod cell;
mod events;
mod stack;

pub use cell::NotificationCell;
pub use events::{DismissReason, StackEvent};
pub use stack::{AnimationPhase, NotificationStack, ReconcileError};
