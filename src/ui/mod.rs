//! Render-facing types
//!
//! This module contains everything a renderer needs to draw the stack:
//! - `theme`: Color schemes, passed as explicit values
//! - `view`: Immutable snapshots of stack state

pub mod theme;
pub mod view;

pub use theme::{KindColors, ThemeMode, ToastColors, ToastTheme};
pub use view::{StackView, ToastView};
