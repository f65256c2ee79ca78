//! Stack configuration types.
//!
//! Settings are persisted to `~/.config/herald/settings.json` (or XDG
//! equivalent) and loaded at startup by hosts that want user-tunable
//! notification placement.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors from settings validation and persistence.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A `max_visible` of zero would hide every notification.
    #[error("max_visible must be at least 1")]
    ZeroCapacity,

    /// No platform config directory could be determined.
    #[error("no config directory available on this platform")]
    NoConfigDir,

    /// Filesystem failure while loading or saving.
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file exists but is not valid JSON.
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Screen placement of the notification stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Top-left corner.
    TopLeft,
    /// Top edge, horizontally centered.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge, horizontally centered.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Position {
    /// Returns true if the stack grows downward from the top of the screen.
    pub fn is_top_anchored(&self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopCenter | Position::TopRight
        )
    }
}

/// Notification stack configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSettings {
    /// Where the stack is anchored on screen.
    pub position: Position,
    /// Maximum simultaneously visible (non-exiting) notifications.
    pub max_visible: usize,
    /// How long an exiting notification animates before removal.
    pub exit_transition: Duration,
    /// Delay between admission and the settled (fully visible) state.
    pub settle_delay: Duration,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            position: Position::BottomRight,
            max_visible: 5,
            exit_transition: Duration::from_millis(300),
            settle_delay: Duration::from_millis(50),
        }
    }
}

impl StackSettings {
    /// Validates the settings, rejecting configurations the stack cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_visible == 0 {
            return Err(SettingsError::ZeroCapacity);
        }
        Ok(())
    }

    /// Returns the settings file path in the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "panbanda", env!("CARGO_PKG_NAME"))
            .ok_or(SettingsError::NoConfigDir)?;
        Ok(dirs.config_dir().join("settings.json"))
    }

    /// Loads settings from the given path, falling back to defaults when
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from the platform config directory, falling back to
    /// defaults when no file exists.
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Saves settings as pretty-printed JSON to the given path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Saves settings to the platform config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }
}
