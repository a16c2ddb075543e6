//! The document corpus on disk.
//!
//! Resolves search tool paths to corpus-relative identifiers, discovers
//! documents recursively and reads their metadata headers.

use crate::model::{DocumentMetadata, MetadataError};
use crate::parser::parse_front_matter;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Usage count of one tag across the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    /// Tag name without the `#` prefix.
    pub tag: String,
    /// Number of documents carrying the tag.
    pub documents: usize,
}

/// Root directory tree of documents with a fixed extension.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    extension: String,
}

impl Corpus {
    /// Create a corpus rooted at `root` holding `*.extension` documents.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Corpus root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Document extension, without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Absolute (root-joined) path of a corpus-relative identifier.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Corpus-relative identifier for a path printed by the search tool.
    ///
    /// Paths printed relative to the root (`./notes/a.md`) lose their `./`.
    /// Paths outside the root are kept as printed.
    pub fn relative_path(&self, file_path: &str) -> String {
        let path = Path::new(file_path);
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Title of a document: its file stem.
    pub fn title_of(path: &str) -> String {
        Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string())
    }

    /// Read and parse a document's metadata header.
    pub fn read_metadata(&self, path: &Path) -> Result<DocumentMetadata, MetadataError> {
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        parse_front_matter(&content).map_err(|reason| MetadataError::InvalidHeader {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Recursively discover documents, sorted by path.
    ///
    /// Hidden directories (`.git`, `.obsidian`, ...) are skipped. Unreadable
    /// entries are logged and skipped.
    pub fn documents(&self) -> Vec<PathBuf> {
        let mut documents: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "Skipping unreadable corpus entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.has_extension(entry.path()))
            .map(DirEntry::into_path)
            .collect();

        documents.sort();
        debug!(count = documents.len(), root = %self.root.display(), "Discovered documents");
        documents
    }

    /// Aggregate tag usage across every document.
    ///
    /// Sorted by descending document count, then tag name. Documents whose
    /// header cannot be read contribute no tags.
    pub fn tag_counts(&self) -> Vec<TagCount> {
        let mut counts: HashMap<String, usize> = HashMap::new();

        for document in self.documents() {
            match self.read_metadata(&document) {
                Ok(metadata) => {
                    for tag in metadata.tags {
                        *counts.entry(tag).or_default() += 1;
                    }
                }
                Err(err) => warn!(error = %err, "Skipping document in tag overview"),
            }
        }

        let mut tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, documents)| TagCount { tag, documents })
            .collect();
        tags.sort_by(|a, b| b.documents.cmp(&a.documents).then_with(|| a.tag.cmp(&b.tag)));
        tags
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.extension))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn relative_path_strips_root() {
        let corpus = Corpus::new("/vault", "md");
        assert_eq!(corpus.relative_path("/vault/daily/a.md"), "daily/a.md");
    }

    #[test]
    fn relative_path_strips_dot_root() {
        let corpus = Corpus::new(".", "md");
        assert_eq!(corpus.relative_path("./daily/a.md"), "daily/a.md");
    }

    #[test]
    fn relative_path_drops_leading_dot_from_root_relative_output() {
        // grep runs inside the root and prints paths relative to it
        let corpus = Corpus::new("/vault", "md");
        assert_eq!(corpus.relative_path("./daily/a.md"), "daily/a.md");
    }

    #[test]
    fn relative_path_keeps_outside_paths() {
        let corpus = Corpus::new("/vault", "md");
        assert_eq!(corpus.relative_path("other/a.md"), "other/a.md");
    }

    #[test]
    fn extension_dot_is_optional() {
        assert_eq!(Corpus::new(".", ".md").extension(), "md");
    }

    #[test]
    fn title_is_file_stem() {
        assert_eq!(Corpus::title_of("daily/2024-03-01.md"), "2024-03-01");
        assert_eq!(Corpus::title_of("README"), "README");
    }

    #[test]
    fn resolve_joins_root() {
        let corpus = Corpus::new("/vault", "md");
        assert_eq!(corpus.resolve("a/b.md"), PathBuf::from("/vault/a/b.md"));
    }

    #[test]
    fn documents_are_filtered_sorted_and_skip_hidden_dirs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.md", "b");
        write(dir.path(), "sub/a.md", "a");
        write(dir.path(), "notes.txt", "ignored");
        write(dir.path(), ".obsidian/workspace.md", "hidden");

        let corpus = Corpus::new(dir.path(), "md");
        let docs: Vec<String> = corpus
            .documents()
            .iter()
            .map(|p| corpus.relative_path(&p.to_string_lossy()))
            .collect();

        assert_eq!(docs, vec!["b.md", "sub/a.md"]);
    }

    #[test]
    fn read_metadata_parses_header() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", "---\ntags: [x]\ndate: d\n---\nbody\n");

        let corpus = Corpus::new(dir.path(), "md");
        let meta = corpus.read_metadata(&dir.path().join("a.md")).unwrap();
        assert_eq!(meta.tags, vec!["x"]);
        assert_eq!(meta.date.as_deref(), Some("d"));
    }

    #[test]
    fn read_metadata_reports_missing_file() {
        let corpus = Corpus::new("/nonexistent-vault", "md");
        let err = corpus
            .read_metadata(Path::new("/nonexistent-vault/a.md"))
            .unwrap_err();
        assert!(matches!(err, MetadataError::Read { .. }));
    }

    #[test]
    fn read_metadata_reports_invalid_header() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.md", "---\ntags: [oops\n---\n");

        let corpus = Corpus::new(dir.path(), "md");
        let err = corpus.read_metadata(&dir.path().join("bad.md")).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidHeader { .. }));
    }

    #[test]
    fn tag_counts_aggregate_and_sort() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", "---\ntags: [rust, notes]\n---\n");
        write(dir.path(), "b.md", "---\ntags: [rust]\n---\n");
        write(dir.path(), "c.md", "---\ntags: [alpha]\n---\n");
        write(dir.path(), "d.md", "---\ntags: [broken\n---\n");

        let corpus = Corpus::new(dir.path(), "md");
        let tags = corpus.tag_counts();

        assert_eq!(
            tags,
            vec![
                TagCount {
                    tag: "rust".into(),
                    documents: 2
                },
                TagCount {
                    tag: "alpha".into(),
                    documents: 1
                },
                TagCount {
                    tag: "notes".into(),
                    documents: 1
                },
            ]
        );
    }
}
