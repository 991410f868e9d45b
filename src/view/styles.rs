//! Pager styling.
//!
//! Search hits and the prompt cursor use reverse video, which works with
//! colors disabled. Only the line number gutter is colored.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Create a ColorConfig with colors explicitly on or off.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== PagerStyles =====

/// Styles used when drawing the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerStyles {
    /// Line numbers.
    pub gutter: Style,
    /// Search hits in content rows.
    pub hit: Style,
    /// The status row in Viewing and NotFound.
    pub status: Style,
    /// The cell under the prompt cursor.
    pub cursor: Style,
}

impl PagerStyles {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let reversed = Style::default().add_modifier(Modifier::REVERSED);
        let gutter = if config.colors_enabled() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Self {
            gutter,
            hit: reversed,
            status: reversed,
            cursor: reversed,
        }
    }
}

impl Default for PagerStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_are_reversed_with_or_without_colors() {
        for enabled in [true, false] {
            let styles = PagerStyles::with_color_config(ColorConfig::new(enabled));
            assert!(styles.hit.add_modifier.contains(Modifier::REVERSED));
        }
    }

    #[test]
    fn gutter_is_plain_without_colors() {
        let styles = PagerStyles::with_color_config(ColorConfig::new(false));
        assert_eq!(styles.gutter, Style::default());
    }

    #[test]
    fn gutter_is_dimmed_with_colors() {
        let styles = PagerStyles::with_color_config(ColorConfig::new(true));
        assert_eq!(styles.gutter.fg, Some(Color::DarkGray));
    }
}
