//! Match aggregation: search tool output to per-document result records.
//!
//! The aggregator runs the search tool once, parses each output line and
//! groups matches by source document. Records appear in first-discovery
//! order; within a record, matches keep discovery order. Each document's
//! metadata header is read exactly once, when its first match is seen.

use crate::model::{MatchExcerpt, SearchError, SearchResult};
use crate::parser::parse_search_line;
use crate::source::{Corpus, SearchTool};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Builds ordered [`SearchResult`] sequences for queries over a corpus.
pub struct Aggregator<'a> {
    tool: &'a dyn SearchTool,
    corpus: &'a Corpus,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator over `corpus` using `tool`.
    pub fn new(tool: &'a dyn SearchTool, corpus: &'a Corpus) -> Self {
        Self { tool, corpus }
    }

    /// Run a search and aggregate its output.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` when the tool is missing or fails. No partial
    /// results are returned in that case.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let lines = self
            .tool
            .search(query, self.corpus.root(), self.corpus.extension())?;
        let results = self.aggregate(&lines);

        info!(
            query,
            lines = lines.len(),
            documents = results.len(),
            "Aggregated search results"
        );
        Ok(results)
    }

    /// Group raw output lines into result records.
    ///
    /// Malformed lines are skipped. Metadata read failures leave the record
    /// with empty metadata.
    pub fn aggregate<S: AsRef<str>>(&self, lines: &[S]) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = Vec::new();
        let mut index_by_path: HashMap<String, usize> = HashMap::new();

        for raw in lines {
            let raw = raw.as_ref();
            let Some(line) = parse_search_line(raw) else {
                warn!(line = raw, "Skipping malformed search output line");
                continue;
            };

            let path = self.corpus.relative_path(line.file_path);
            let excerpt = MatchExcerpt::new(line.line_number, line.text);

            if let Some(&index) = index_by_path.get(&path) {
                results[index].matches.push(excerpt);
                continue;
            }

            let metadata = match self.corpus.read_metadata(&self.corpus.resolve(&path)) {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!(error = %err, "Metadata unavailable, continuing with empty fields");
                    Default::default()
                }
            };

            debug!(path = %path, "New result document");
            index_by_path.insert(path.clone(), results.len());
            results.push(SearchResult::new(
                Corpus::title_of(&path),
                path,
                excerpt,
                metadata,
            ));
        }

        results
    }
}
