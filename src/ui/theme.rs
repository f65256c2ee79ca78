//! Theme definitions for herald toasts
//!
//! The theme is an explicit value handed to whatever renders the stack,
//! never ambient state. Colors are plain `0xRRGGBBAA` values so any
//! renderer can consume them.

use crate::domain::NotificationKind;

/// Accent and background tint for one notification kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindColors {
    /// Icon, border, and primary-action color
    pub accent: u32,
    /// Low-alpha tint behind the icon
    pub background: u32,
}

/// Color palette for toast rendering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastColors {
    // Card
    pub surface: u32,

    // Text
    pub text_primary: u32,
    pub text_secondary: u32,

    // Per-kind colors
    pub success: KindColors,
    pub error: KindColors,
    pub warning: KindColors,
    pub info: KindColors,
}

impl ToastColors {
    /// Dark theme colors
    pub fn dark() -> Self {
        Self {
            surface: 0x27272AFF,

            text_primary: 0xF4F4F5FF,
            text_secondary: 0xA1A1AAFF,

            success: KindColors {
                accent: 0x22C55EFF,
                background: 0x22C55E20,
            },
            error: KindColors {
                accent: 0xEF4444FF,
                background: 0xEF444420,
            },
            warning: KindColors {
                accent: 0xF59E0BFF,
                background: 0xF59E0B20,
            },
            info: KindColors {
                accent: 0x3B82F6FF,
                background: 0x3B82F620,
            },
        }
    }

    /// Light theme colors
    pub fn light() -> Self {
        Self {
            surface: 0xFFFFFFFF,

            text_primary: 0x1A1A1AFF,
            text_secondary: 0x666666FF,

            success: KindColors {
                accent: 0x34A853FF,
                background: 0x34A85320,
            },
            error: KindColors {
                accent: 0xEA4335FF,
                background: 0xEA433520,
            },
            warning: KindColors {
                accent: 0xFBBC04FF,
                background: 0xFBBC0420,
            },
            info: KindColors {
                accent: 0x1A73E8FF,
                background: 0x1A73E820,
            },
        }
    }
}

/// Theme mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Toast theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastTheme {
    pub mode: ThemeMode,
    pub colors: ToastColors,
}

impl Default for ToastTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ToastTheme {
    /// Create dark theme
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            colors: ToastColors::dark(),
        }
    }

    /// Create light theme
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            colors: ToastColors::light(),
        }
    }

    /// Toggle between light and dark
    pub fn toggle(&mut self) {
        match self.mode {
            ThemeMode::Dark => *self = Self::light(),
            ThemeMode::Light => *self = Self::dark(),
        }
    }

    /// Colors for a notification kind
    pub fn kind_colors(&self, kind: NotificationKind) -> KindColors {
        match kind {
            NotificationKind::Success => self.colors.success,
            NotificationKind::Error => self.colors.error,
            NotificationKind::Warning => self.colors.warning,
            NotificationKind::Info => self.colors.info,
        }
    }
}
