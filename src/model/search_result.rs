//! Per-document search result records.

use crate::model::DocumentMetadata;

/// One matched line reported by the search tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchExcerpt {
    /// 1-based line number inside the source document.
    pub line_number: usize,
    /// Matched line text, trimmed of surrounding whitespace.
    pub text: String,
}

impl MatchExcerpt {
    /// Create an excerpt, trimming the matched text.
    pub fn new(line_number: usize, text: &str) -> Self {
        Self {
            line_number,
            text: text.trim().to_string(),
        }
    }
}

/// All matches for one source document.
///
/// At most one `SearchResult` exists per `path`. Metadata is filled in once,
/// when the first match for the document is discovered; later matches only
/// append to `matches`. Records are immutable once aggregation finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Document title (file stem).
    pub title: String,
    /// Corpus-relative path, unique key of the record.
    pub path: String,
    /// Matched excerpts in discovery order.
    pub matches: Vec<MatchExcerpt>,
    /// Metadata header contents read on first discovery.
    pub metadata: DocumentMetadata,
}

impl SearchResult {
    /// Create a record holding its first match.
    pub fn new(
        title: impl Into<String>,
        path: impl Into<String>,
        first_match: MatchExcerpt,
        metadata: DocumentMetadata,
    ) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            matches: vec![first_match],
            metadata,
        }
    }

    /// Number of matched lines in this document.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Tags from the metadata header.
    pub fn tags(&self) -> &[String] {
        &self.metadata.tags
    }

    /// Date from the metadata header, or an empty string.
    pub fn date(&self) -> &str {
        self.metadata.date.as_deref().unwrap_or("")
    }

    /// Last-modified stamp from the metadata header, or an empty string.
    pub fn last_modified(&self) -> &str {
        self.metadata.last_modified.as_deref().unwrap_or("")
    }
}
