//! Screen styling.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

// ===== ColorConfig =====

/// Whether color output is enabled.
///
/// Disabled by the `--no-color` flag or any `NO_COLOR` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from the CLI flag and the environment.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Explicitly enabled or disabled colors.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Styles shared by all screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen and block titles.
    pub title: Style,
    /// Selected row on lists.
    pub highlight: Style,
    /// Key hints in footers.
    pub hint: Style,
    /// Error and status notices.
    pub notice: Style,
    /// Tag names.
    pub tag: Style,
    /// Secondary text such as excerpts and paths.
    pub muted: Style,
    /// Field labels on the detail screen.
    pub label: Style,
    colors: bool,
}

impl Palette {
    /// Build the palette. Without colors only modifiers are kept, so the
    /// selection stays visible.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                title: bold.fg(Color::Cyan),
                highlight: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                hint: Style::default().fg(Color::DarkGray),
                notice: Style::default().fg(Color::Red),
                tag: Style::default().fg(Color::Yellow),
                muted: Style::default().fg(Color::Gray),
                label: bold,
                colors: true,
            }
        } else {
            Self {
                title: bold,
                highlight: Style::default().add_modifier(Modifier::REVERSED),
                hint: Style::default(),
                notice: Style::default(),
                tag: Style::default(),
                muted: Style::default(),
                label: bold,
                colors: false,
            }
        }
    }

    /// Whether colors are enabled.
    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    /// Drop foreground/background colors from pre-styled lines when colors
    /// are disabled. Modifiers such as bold survive.
    pub fn apply_to(&self, lines: Vec<Line<'static>>) -> Vec<Line<'static>> {
        if self.colors {
            return lines;
        }
        lines
            .into_iter()
            .map(|mut line| {
                line.style = strip_colors(line.style);
                for span in &mut line.spans {
                    span.style = strip_colors(span.style);
                }
                line
            })
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::new(true))
    }
}

fn strip_colors(style: Style) -> Style {
    Style {
        fg: None,
        bg: None,
        ..style
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Span;
    use serial_test::serial;

    #[test]
    #[serial(no_color)]
    fn no_color_flag_disables_colors() {
        assert!(!ColorConfig::from_env_and_args(true).colors_enabled());
    }

    #[test]
    #[serial(no_color)]
    fn no_color_env_disables_colors() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(!config.colors_enabled());
    }

    #[test]
    #[serial(no_color)]
    fn colors_enabled_by_default() {
        std::env::remove_var("NO_COLOR");
        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    #[test]
    fn plain_palette_has_no_colors_but_visible_selection() {
        let palette = Palette::with_color_config(ColorConfig::new(false));
        assert_eq!(palette.tag.fg, None);
        assert_eq!(palette.notice.fg, None);
        assert!(palette.highlight.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn apply_to_strips_colors_only_when_disabled() {
        let line = Line::from(Span::styled(
            "x",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

        let colored = Palette::default().apply_to(vec![line.clone()]);
        assert_eq!(colored[0].spans[0].style.fg, Some(Color::Red));

        let plain = Palette::with_color_config(ColorConfig::new(false)).apply_to(vec![line]);
        assert_eq!(plain[0].spans[0].style.fg, None);
        assert!(plain[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }
}
