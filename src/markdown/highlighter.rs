//! Syntax highlighting for fenced code blocks, using syntect + two-face.
//!
//! Theme names are the kebab-case names of the two-face embedded themes,
//! e.g. `gruvbox-dark`, `nord`, `base16-ocean-dark` (see [`VALID_THEMES`]).

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::sync::LazyLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::FontStyle;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

/// Theme used when none is configured or the configured one is unknown.
pub const DEFAULT_THEME: &str = "base16-ocean-dark";

/// All theme names accepted in configuration.
pub const VALID_THEMES: &[&str] = &[
    "ansi",
    "base16",
    "base16-256",
    "base16-eighties-dark",
    "base16-mocha-dark",
    "base16-ocean-dark",
    "base16-ocean-light",
    "coldark-cold",
    "coldark-dark",
    "dark-neon",
    "dracula",
    "github",
    "gruvbox-dark",
    "gruvbox-light",
    "inspired-github",
    "leet",
    "monokai",
    "monokai-bright",
    "monokai-light",
    "monokai-origin",
    "nord",
    "one-half-dark",
    "one-half-light",
    "solarized-dark",
    "solarized-light",
    "sublime-snazzy",
    "two-dark",
    "visual-studio-dark-plus",
    "zenburn",
];

static THEME_SET: LazyLock<EmbeddedLazyThemeSet> = LazyLock::new(two_face::theme::extra);
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(two_face::syntax::extra_newlines);

#[allow(deprecated)] // VisualStudioDarkPlus is deprecated in two-face 0.4.5
fn embedded_theme(name: &str) -> Option<EmbeddedThemeName> {
    let theme = match name {
        "ansi" => EmbeddedThemeName::Ansi,
        "base16" => EmbeddedThemeName::Base16,
        "base16-256" => EmbeddedThemeName::Base16_256,
        "base16-eighties-dark" => EmbeddedThemeName::Base16EightiesDark,
        "base16-mocha-dark" => EmbeddedThemeName::Base16MochaDark,
        "base16-ocean-dark" => EmbeddedThemeName::Base16OceanDark,
        "base16-ocean-light" => EmbeddedThemeName::Base16OceanLight,
        "coldark-cold" => EmbeddedThemeName::ColdarkCold,
        "coldark-dark" => EmbeddedThemeName::ColdarkDark,
        "dark-neon" => EmbeddedThemeName::DarkNeon,
        "dracula" => EmbeddedThemeName::Dracula,
        "github" => EmbeddedThemeName::Github,
        "gruvbox-dark" => EmbeddedThemeName::GruvboxDark,
        "gruvbox-light" => EmbeddedThemeName::GruvboxLight,
        "inspired-github" => EmbeddedThemeName::InspiredGithub,
        "leet" => EmbeddedThemeName::Leet,
        "monokai" | "monokai-extended" => EmbeddedThemeName::MonokaiExtended,
        "monokai-bright" => EmbeddedThemeName::MonokaiExtendedBright,
        "monokai-light" => EmbeddedThemeName::MonokaiExtendedLight,
        "monokai-origin" => EmbeddedThemeName::MonokaiExtendedOrigin,
        "nord" => EmbeddedThemeName::Nord,
        "one-half-dark" => EmbeddedThemeName::OneHalfDark,
        "one-half-light" => EmbeddedThemeName::OneHalfLight,
        "solarized-dark" => EmbeddedThemeName::SolarizedDark,
        "solarized-light" => EmbeddedThemeName::SolarizedLight,
        "sublime-snazzy" => EmbeddedThemeName::SublimeSnazzy,
        "two-dark" => EmbeddedThemeName::TwoDark,
        "visual-studio-dark-plus" => EmbeddedThemeName::VisualStudioDarkPlus,
        "zenburn" => EmbeddedThemeName::Zenburn,
        _ => return None,
    };
    Some(theme)
}

/// Check if a theme name is valid.
pub fn is_valid_theme(name: &str) -> bool {
    embedded_theme(name).is_some()
}

/// Code block highlighter bound to one theme.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    theme: EmbeddedThemeName,
}

impl SyntaxHighlighter {
    /// Create a highlighter. Unknown theme names fall back to [`DEFAULT_THEME`].
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: embedded_theme(theme_name).unwrap_or(EmbeddedThemeName::Base16OceanDark),
        }
    }

    /// Highlight `code`, one output line per source line.
    ///
    /// `language` is a fence info token such as `rust` or `yaml`; unknown or
    /// missing languages render as plain text.
    pub fn highlight_code(&self, code: &str, language: Option<&str>) -> Vec<Line<'static>> {
        let theme = THEME_SET.get(self.theme);
        let syntax = language
            .and_then(|lang| SYNTAX_SET.find_syntax_by_token(lang))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, theme);
        LinesWithEndings::from(code)
            .map(|line| match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(regions) => Line::from(
                    regions
                        .into_iter()
                        .map(|(style, text)| {
                            Span::styled(
                                text.trim_end_matches(['\r', '\n']).to_string(),
                                to_ratatui_style(style),
                            )
                        })
                        .filter(|span| !span.content.is_empty())
                        .collect::<Vec<_>>(),
                ),
                Err(_) => Line::from(line.trim_end().to_string()),
            })
            .collect()
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

fn to_ratatui_style(style: syntect::highlighting::Style) -> Style {
    let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
    let mut out = Style::default().fg(fg);

    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}
