//! Color palette for the login form, member list and overlays.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Styles used across screens.
///
/// With colors disabled every style keeps its modifiers (bold, dim, reversed)
/// but drops foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Member names and screen titles.
    pub title: Style,
    /// `@handle` next to a member name.
    pub handle: Style,
    /// Contact and company detail rows.
    pub detail: Style,
    /// Hints, separators, dismissed text.
    pub muted: Style,
    /// Focused input, key names in hints.
    pub accent: Style,
    /// Login errors and fetch failures.
    pub error: Style,
    /// Category headers in the help overlay.
    pub section_header: Style,
    /// Status bar background.
    pub status_bar: Style,
    /// Borders of boxes and overlays.
    pub border: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

impl Palette {
    /// Palette honoring the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                handle: Style::default().fg(Color::Cyan),
                detail: Style::default().fg(Color::Gray),
                muted: Style::default().fg(Color::DarkGray),
                accent: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                section_header: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                status_bar: Style::default().fg(Color::Black).bg(Color::Gray),
                border: Style::default().fg(Color::Cyan),
            }
        } else {
            Self::monochrome()
        }
    }

    fn monochrome() -> Self {
        let plain = Style::default();
        Self {
            title: plain.add_modifier(Modifier::BOLD),
            handle: plain,
            detail: plain,
            muted: plain.add_modifier(Modifier::DIM),
            accent: plain.add_modifier(Modifier::BOLD),
            error: plain.add_modifier(Modifier::BOLD),
            section_header: plain.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            status_bar: plain.add_modifier(Modifier::REVERSED),
            border: plain,
        }
    }
}
