//! Document preview rendering.
//!
//! A document is rewritten (see [`rewrite`]), split into prose and fenced
//! code segments, then prose goes through `tui-markdown` and code blocks go
//! through the [`SyntaxHighlighter`].

pub mod highlighter;
pub mod rewrite;

pub use highlighter::{is_valid_theme, SyntaxHighlighter, DEFAULT_THEME, VALID_THEMES};
pub use rewrite::rewrite_document;

use ratatui::text::{Line, Span};
use tui_markdown::from_str;

/// A run of document text that renders one way.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Prose(&'a str),
    Code {
        language: Option<&'a str>,
        code: String,
    },
}

/// Render a raw document into styled lines.
pub fn render_document(content: &str, highlighter: &SyntaxHighlighter) -> Vec<Line<'static>> {
    let rewritten = rewrite_document(content);
    let mut lines = Vec::new();

    for segment in split_segments(&rewritten) {
        match segment {
            Segment::Prose(text) if text.trim().is_empty() => {}
            Segment::Prose(text) => lines.extend(render_prose(text)),
            Segment::Code { language, code } => {
                lines.extend(highlighter.highlight_code(&code, language));
                lines.push(Line::default());
            }
        }
    }

    lines
}

fn render_prose(text: &str) -> Vec<Line<'static>> {
    from_str(text)
        .lines
        .into_iter()
        .map(|line| {
            let base = line.style;
            let spans: Vec<Span<'static>> = line
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content.into_owned(), base.patch(span.style)))
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut prose_start = 0;
    let mut offset = 0;
    let mut open: Option<(Option<&str>, String)> = None;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if open.is_none() && trimmed.starts_with("```") {
            if prose_start < offset {
                segments.push(Segment::Prose(&text[prose_start..offset]));
            }
            let info = trimmed.trim_start_matches('`').trim();
            open = Some((info.split_whitespace().next(), String::new()));
        } else if open.is_some() && trimmed == "```" {
            if let Some((language, code)) = open.take() {
                segments.push(Segment::Code { language, code });
            }
            prose_start = offset + line.len();
        } else if let Some((_, code)) = open.as_mut() {
            code.push_str(line);
        }
        offset += line.len();
    }

    match open {
        // Unclosed fence: keep the code as code.
        Some((language, code)) => segments.push(Segment::Code { language, code }),
        None if prose_start < text.len() => segments.push(Segment::Prose(&text[prose_start..])),
        None => {}
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn splits_prose_and_code() {
        let segments = split_segments("intro\n```rust\nfn a() {}\n```\noutro\n");
        assert_eq!(
            segments,
            vec![
                Segment::Prose("intro\n"),
                Segment::Code {
                    language: Some("rust"),
                    code: "fn a() {}\n".to_string()
                },
                Segment::Prose("outro\n"),
            ]
        );
    }

    #[test]
    fn unclosed_fence_is_code() {
        let segments = split_segments("```\nabc\n");
        assert_eq!(
            segments,
            vec![Segment::Code {
                language: None,
                code: "abc\n".to_string()
            }]
        );
    }

    #[test]
    fn header_renders_as_code_lines() {
        let highlighter = SyntaxHighlighter::default();
        let lines = render_document("---\ntags: [rust]\ndate: 2024-01-01\n---\nHello\n", &highlighter);
        let text = plain(&lines);

        assert_eq!(text[0], "tags: [rust]");
        assert_eq!(text[1], "date: 2024-01-01");
        assert!(text.iter().any(|l| l.contains("Hello")));
    }

    #[test]
    fn bold_prose_keeps_markdown_styling() {
        let lines = render_document("some **bold** text", &SyntaxHighlighter::default());
        let bold = lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content.contains("bold"))
            .expect("bold span rendered");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn links_and_tags_are_readable() {
        let lines = render_document("See [[Other Note]] #todo\n", &SyntaxHighlighter::default());
        let joined = plain(&lines).join("\n");
        assert!(joined.contains("Other Note"));
        assert!(joined.contains("#todo"));
        assert!(!joined.contains("[["));
    }
}
