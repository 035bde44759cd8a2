//! Color themes for the selector.
//!
//! The theme is picked by name from `ui.theme` in the project configuration.

use ratatui::style::Color;

/// Colors used by the selector panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name for display and configuration
    pub name: String,
    /// Focused pane border and titles
    pub primary: Color,
    /// Enabled location markers
    pub secondary: Color,
    /// Location prefix in result lines
    pub accent: Color,
    /// Main text color
    pub text: Color,
    /// Unfocused text
    pub text_dim: Color,
    /// Placeholders and help bar
    pub text_muted: Color,
    /// Background color (Reset uses terminal default)
    pub background: Color,
    /// Highlighted row background
    pub selected_bg: Color,
    /// Unfocused pane border
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    /// Default theme - works well on both light and dark terminals.
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            primary: Color::Rgb(99, 102, 241),     // Indigo
            secondary: Color::Rgb(16, 185, 129),   // Emerald
            accent: Color::Rgb(251, 146, 60),      // Orange
            text: Color::White,
            text_dim: Color::Rgb(156, 163, 175),   // Gray-400
            text_muted: Color::Rgb(107, 114, 128), // Gray-500
            background: Color::Reset,
            selected_bg: Color::Rgb(55, 65, 81),   // Gray-700
            border: Color::Rgb(75, 85, 99),        // Gray-600
        }
    }

    /// Dracula theme.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            primary: Color::Rgb(189, 147, 249),   // Purple
            secondary: Color::Rgb(80, 250, 123),  // Green
            accent: Color::Rgb(255, 121, 198),    // Pink
            text: Color::Rgb(248, 248, 242),
            text_dim: Color::Rgb(189, 147, 249),
            text_muted: Color::Rgb(98, 114, 164), // Comment
            background: Color::Rgb(40, 42, 54),
            selected_bg: Color::Rgb(68, 71, 90),
            border: Color::Rgb(68, 71, 90),
        }
    }

    /// Nord theme.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            primary: Color::Rgb(136, 192, 208),   // Frost
            secondary: Color::Rgb(163, 190, 140), // Aurora green
            accent: Color::Rgb(208, 135, 112),    // Aurora orange
            text: Color::Rgb(236, 239, 244),
            text_dim: Color::Rgb(216, 222, 233),
            text_muted: Color::Rgb(76, 86, 106),
            background: Color::Rgb(46, 52, 64),
            selected_bg: Color::Rgb(59, 66, 82),
            border: Color::Rgb(67, 76, 94),
        }
    }

    /// High contrast theme using only the basic terminal palette.
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            primary: Color::Cyan,
            secondary: Color::Green,
            accent: Color::Yellow,
            text: Color::White,
            text_dim: Color::LightCyan,
            text_muted: Color::Gray,
            background: Color::Black,
            selected_bg: Color::Blue,
            border: Color::White,
        }
    }

    /// Get a theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_theme()),
            "dracula" => Some(Self::dracula()),
            "nord" => Some(Self::nord()),
            "high-contrast" | "high_contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// Get a theme by name, falling back to the default for unknown names.
    pub fn resolve(name: &str) -> Self {
        Self::by_name(name).unwrap_or_else(|| {
            tracing::warn!(
                theme = name,
                available = ?Self::available_themes(),
                "Unknown theme, using default"
            );
            Self::default_theme()
        })
    }

    /// List all available built-in theme names.
    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "dracula", "nord", "high-contrast"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_by_name() {
        assert!(Theme::by_name("dracula").is_some());
        assert!(Theme::by_name("NORD").is_some());
        assert!(Theme::by_name("high_contrast").is_some());
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(Theme::resolve("nord").name, "nord");
        assert_eq!(Theme::resolve("no-such-theme"), Theme::default());
    }

    #[test]
    fn test_all_builtin_themes_valid() {
        for name in Theme::available_themes() {
            let theme = Theme::by_name(name).unwrap_or_else(|| panic!("Theme {name} should exist"));
            assert_eq!(theme.name, name);
        }
    }
}
