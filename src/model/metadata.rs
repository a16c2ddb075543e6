//! Typed document metadata read from a document's header block.

/// Metadata consumed from a document header.
///
/// Every field is optional in the source document; absent or malformed
/// values default to empty. `tags` keeps first-seen order and holds no
/// duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// Tag set from the `tags` key.
    pub tags: Vec<String>,
    /// Value of the `date` key.
    pub date: Option<String>,
    /// Value of the `lastmod` key.
    pub last_modified: Option<String>,
}

impl DocumentMetadata {
    /// Build metadata from raw tags, dropping blanks and duplicates.
    pub fn new(
        tags: impl IntoIterator<Item = String>,
        date: Option<String>,
        last_modified: Option<String>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.trim().trim_start_matches('#').to_string();
            if !tag.is_empty() && !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        Self {
            tags: unique,
            date: date.filter(|d| !d.trim().is_empty()),
            last_modified: last_modified.filter(|d| !d.trim().is_empty()),
        }
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.date.is_none() && self.last_modified.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_deduplicates_tags_preserving_order() {
        let meta = DocumentMetadata::new(
            vec!["rust".into(), "notes".into(), "rust".into()],
            None,
            None,
        );
        assert_eq!(meta.tags, vec!["rust", "notes"]);
    }

    #[test]
    fn new_strips_hash_prefix_and_blank_tags() {
        let meta = DocumentMetadata::new(vec!["#todo".into(), "  ".into()], None, None);
        assert_eq!(meta.tags, vec!["todo"]);
    }

    #[test]
    fn blank_dates_become_none() {
        let meta = DocumentMetadata::new(Vec::new(), Some(" ".into()), Some(String::new()));
        assert!(meta.is_empty());
    }
}
