//! Frame renderers, one per screen.
//!
//! Every function draws a full frame from borrowed state and never mutates
//! it.

use super::styles::Palette;
use crate::model::SearchResult;
use crate::source::TagCount;
use crate::state::{MainMenu, Navigator};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Key hints shown on the results list.
pub const RESULTS_HINT: &str = "↑/↓ move  0-9 jump  Enter open  t table  m menu  q quit";
/// Key hints shown on the detail screen.
pub const DETAIL_HINT: &str = "o open in editor  p preview  r/m back to results  q quit";
/// Footer of screens left with any key.
pub const ANY_KEY_HINT: &str = "press any key to return";
/// Appended to the preview footer when the document does not fit.
pub const TRUNCATED_HINT: &str = "… (truncated)";

/// Split `area` into a body and a one-line footer.
fn body_and_footer(area: Rect) -> (Rect, Rect) {
    let [body, footer] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    (body, footer)
}

/// Cut `text` to at most `max_width` display columns, marking the cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            if out.pop().is_some() {
                out.push('…');
            }
            return out;
        }
        width += w;
        out.push(ch);
    }
    out
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}es")
    }
}

fn tag_list(result: &SearchResult) -> String {
    result
        .tags()
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ===== Main menu =====

/// Outer menu: corpus, commands, notice.
pub fn render_main_menu(frame: &mut Frame, menu: &MainMenu, root: &str, palette: &Palette) {
    let (body, footer) = body_and_footer(frame.area());

    let mut lines = vec![
        Line::from(Span::styled(format!("Vault: {root}"), palette.muted)),
        Line::default(),
        Line::from(vec![Span::styled("  s  ", palette.label), Span::raw("search")]),
        Line::from(vec![Span::styled("  t  ", palette.label), Span::raw("tags")]),
        Line::from(vec![Span::styled("  q  ", palette.label), Span::raw("quit")]),
    ];
    if let Some(notice) = menu.notice() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(notice.to_string(), palette.notice)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" vaultnav ", palette.title));
    frame.render_widget(Paragraph::new(lines).block(block), body);
    frame.render_widget(
        Paragraph::new(Span::styled("choose a command", palette.hint)),
        footer,
    );
}

// ===== Results list =====

/// Results list with the selected row highlighted and the jump buffer shown.
pub fn render_results_list(frame: &mut Frame, navigator: &Navigator, palette: &Palette) {
    let (body, footer) = body_and_footer(frame.area());
    let excerpt_width = usize::from(body.width.saturating_sub(10));

    let items: Vec<ListItem> = navigator
        .results()
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let heading = Line::from(vec![
                Span::raw(format!("{:>3}. ", i + 1)),
                Span::styled(result.title.clone(), palette.label),
                Span::styled(
                    format!("  ({})", plural(result.match_count(), "match")),
                    palette.muted,
                ),
            ]);
            let excerpt = result
                .matches
                .first()
                .map(|m| truncate_to_width(&m.text, excerpt_width))
                .unwrap_or_default();
            ListItem::new(vec![
                heading,
                Line::from(Span::styled(format!("     {excerpt}"), palette.muted)),
            ])
        })
        .collect();

    let title = format!(" Results ({}) ", navigator.results().len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, palette.title)),
        )
        .highlight_style(palette.highlight)
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(navigator.selected_index()));
    frame.render_stateful_widget(list, body, &mut state);

    let mut hint = vec![Span::styled(RESULTS_HINT, palette.hint)];
    let pending = navigator.state().numeric_input();
    if !pending.is_empty() {
        hint.push(Span::styled(
            format!("  jump: {}", pending.as_str()),
            palette.label,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(hint)), footer);
}

// ===== Table =====

/// All results as one table.
pub fn render_results_table(frame: &mut Frame, results: &[SearchResult], palette: &Palette) {
    let (body, footer) = body_and_footer(frame.area());

    let header = Row::new(["#", "Title", "Path", "Matches", "Tags", "Date", "Modified"])
        .style(palette.label);
    let rows = results.iter().enumerate().map(|(i, r)| {
        Row::new(vec![
            Cell::from((i + 1).to_string()),
            Cell::from(r.title.clone()),
            Cell::from(Span::styled(r.path.clone(), palette.muted)),
            Cell::from(r.match_count().to_string()),
            Cell::from(Span::styled(tag_list(r), palette.tag)),
            Cell::from(r.date().to_string()),
            Cell::from(r.last_modified().to_string()),
        ])
    });
    let widths = [
        Constraint::Length(4),
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Length(7),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Results table ", palette.title)),
    );
    frame.render_widget(table, body);
    frame.render_widget(Paragraph::new(Span::styled(ANY_KEY_HINT, palette.hint)), footer);
}

// ===== Detail =====

/// One result with its metadata, every excerpt and the command menu.
pub fn render_detail(
    frame: &mut Frame,
    result: &SearchResult,
    notice: Option<&str>,
    palette: &Palette,
) {
    let [body, notice_area, footer] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let field = |label: &str, value: String| {
        let value = if value.is_empty() { "-".to_string() } else { value };
        Line::from(vec![
            Span::styled(format!("{label:<15}"), palette.label),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        field("Path", result.path.clone()),
        Line::from(vec![
            Span::styled(format!("{:<15}", "Tags"), palette.label),
            Span::styled(
                if result.tags().is_empty() {
                    "-".to_string()
                } else {
                    tag_list(result)
                },
                palette.tag,
            ),
        ]),
        field("Date", result.date().to_string()),
        field("Last modified", result.last_modified().to_string()),
        Line::default(),
        Line::from(Span::styled(
            plural(result.match_count(), "match"),
            palette.label,
        )),
    ];
    lines.extend(result.matches.iter().map(|m| {
        Line::from(vec![
            Span::styled(format!("  {:>5}: ", m.line_number), palette.muted),
            Span::raw(m.text.clone()),
        ])
    }));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", result.title), palette.title));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        body,
    );

    if let Some(notice) = notice {
        frame.render_widget(
            Paragraph::new(Span::styled(notice.to_string(), palette.notice)),
            notice_area,
        );
    }
    frame.render_widget(Paragraph::new(Span::styled(DETAIL_HINT, palette.hint)), footer);
}

// ===== Preview =====

/// Rendered document body.
pub fn render_preview(frame: &mut Frame, title: &str, lines: &[Line<'static>], palette: &Palette) {
    let (body, footer) = body_and_footer(frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {title} "), palette.title));
    frame.render_widget(
        Paragraph::new(lines.to_vec())
            .block(block)
            .wrap(Wrap { trim: false }),
        body,
    );

    let inner = Rect {
        width: body.width.saturating_sub(2),
        height: body.height.saturating_sub(2),
        ..body
    };
    let mut hint = vec![Span::styled(ANY_KEY_HINT, palette.hint)];
    if wrapped_height(lines, inner.width) > usize::from(inner.height) {
        hint.push(Span::raw("  "));
        hint.push(Span::styled(TRUNCATED_HINT, palette.muted));
    }
    frame.render_widget(Paragraph::new(Line::from(hint)), footer);
}

/// Rows `lines` take when wrapped at `width` columns, at least one per line.
///
/// Word wrapping can only add rows, so this never reports a cut-off
/// document as fitting when the raw widths already overflow.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

// ===== Tag overview =====

/// Corpus-wide tag usage, most used first.
pub fn render_tag_overview(frame: &mut Frame, tags: &[TagCount], palette: &Palette) {
    let (body, footer) = body_and_footer(frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" Tags ({}) ", tags.len()), palette.title));

    if tags.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No tags found", palette.muted)).block(block),
            body,
        );
    } else {
        let rows = tags.iter().map(|t| {
            Row::new(vec![
                Cell::from(Span::styled(format!("#{}", t.tag), palette.tag)),
                Cell::from(t.documents.to_string()),
            ])
        });
        let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(9)])
            .header(Row::new(["Tag", "Documents"]).style(palette.label))
            .block(block);
        frame.render_widget(table, body);
    }
    frame.render_widget(Paragraph::new(Span::styled(ANY_KEY_HINT, palette.hint)), footer);
}

#[cfg(test)]
#[path = "screens_tests.rs"]
mod tests;
