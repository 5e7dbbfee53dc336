/*!
Semantic colour roles for the registration TUI.

Components never pick raw colours; they ask the active `Theme` for a role
(`Danger` for inline errors, `Primary` for the focused input, ...).
*/

use ratatui::style::{Color, Style};

/// Semantic roles used by widgets to request colors independent of a specific theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Background,
    Text,
    SubtleText,
    Primary,
    Success,
    Warning,
    Danger,
    Info,
    Muted,
}

/// A mapping from semantic roles to colors for a given Theme.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RoleColors {
    pub background: Color,
    pub text: Color,
    pub subtle_text: Color,
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,
    pub muted: Color,
}

impl RoleColors {
    pub fn color(&self, role: Role) -> Color {
        match role {
            Role::Background => self.background,
            Role::Text => self.text,
            Role::SubtleText => self.subtle_text,
            Role::Primary => self.primary,
            Role::Success => self.success,
            Role::Warning => self.warning,
            Role::Danger => self.danger,
            Role::Info => self.info,
            Role::Muted => self.muted,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    pub name: String,
    pub roles: RoleColors,
}

impl Theme {
    /// Convenience method to turn a role into a ratatui `Style`.
    pub fn style(&self, role: Role) -> Style {
        Style::default().fg(self.roles.color(role))
    }

    /// Pick a theme by name; unknown names fall back to the dark theme.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "high-contrast" | "high_contrast" | "contrast" => high_contrast_theme(),
            _ => default_dark_theme(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_dark_theme()
    }
}

/// Default dark theme with a warm accent.
pub fn default_dark_theme() -> Theme {
    Theme {
        name: "Default Dark".to_string(),
        roles: RoleColors {
            background: Color::Rgb(30, 15, 0),
            text: Color::Rgb(220, 220, 220),
            subtle_text: Color::Rgb(130, 130, 130),
            primary: Color::Rgb(255, 154, 79), // warm orange
            success: Color::Rgb(102, 187, 106),
            warning: Color::Rgb(255, 214, 102),
            danger: Color::Rgb(239, 83, 80),
            info: Color::Rgb(144, 202, 249),
            muted: Color::Rgb(120, 120, 128),
        },
    }
}

/// A higher-contrast theme useful for demos or low-quality projectors.
pub fn high_contrast_theme() -> Theme {
    Theme {
        name: "High Contrast".to_string(),
        roles: RoleColors {
            background: Color::Rgb(0, 0, 0),
            text: Color::Rgb(250, 250, 250),
            subtle_text: Color::Rgb(200, 200, 200),
            primary: Color::Rgb(255, 200, 0),
            success: Color::Rgb(0, 255, 100),
            warning: Color::Rgb(255, 180, 0),
            danger: Color::Rgb(255, 70, 70),
            info: Color::Rgb(130, 180, 255),
            muted: Color::Rgb(140, 140, 140),
        },
    }
}
