//! Configuration and settings management.
//!
//! This module provides the stack settings types and JSON persistence.
//! Settings are stored in the user's config directory.

mod settings;

pub use settings::{Position, Result, SettingsError, StackSettings};
