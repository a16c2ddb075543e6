//! Parser for line-oriented search tool output.
//!
//! Each line has the shape `<filePath>:<lineNumber>:<matchedText>`. Only the
//! first two colons are delimiters; the matched text may contain colons.

/// One parsed output line, borrowing from the raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLine<'a> {
    /// File path as printed by the search tool.
    pub file_path: &'a str,
    /// 1-based line number.
    pub line_number: usize,
    /// Matched text, untrimmed.
    pub text: &'a str,
}

/// Parse one search tool output line.
///
/// Returns `None` for lines that do not follow the `path:line:text` shape
/// (missing delimiters, empty path, or a non-numeric line number).
pub fn parse_search_line(line: &str) -> Option<SearchLine<'_>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut parts = line.splitn(3, ':');

    let file_path = parts.next().filter(|p| !p.is_empty())?;
    let line_number = parts.next()?.parse::<usize>().ok()?;
    let text = parts.next()?;

    Some(SearchLine {
        file_path,
        line_number,
        text,
    })
}
