//! Tolerant parser for the metadata header at the top of a document.
//!
//! A header is a YAML block bounded by [`HEADER_MARKER`] lines:
//!
//! ```text
//! ---
//! tags: [rust, notes]
//! date: 2024-03-01
//! lastmod: 2024-03-09
//! ---
//! Body text...
//! ```
//!
//! Only `tags`, `date` and `lastmod` are consumed. Absent keys default to
//! empty; unknown keys are ignored.

use crate::model::DocumentMetadata;
use serde::Deserialize;

/// Marker line opening and closing the header block.
pub const HEADER_MARKER: &str = "---";

/// A header block split off the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Raw header text between the markers (without the marker lines).
    pub header: &'a str,
    /// Everything after the closing marker line.
    pub body: &'a str,
}

/// Raw header shape as deserialized from YAML.
#[derive(Debug, Default, Deserialize)]
struct RawHeader {
    #[serde(default)]
    tags: Option<TagsField>,
    #[serde(default)]
    date: Option<serde_yaml::Value>,
    #[serde(default)]
    lastmod: Option<serde_yaml::Value>,
}

/// `tags` may be a list or a single scalar.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagsField {
    List(Vec<serde_yaml::Value>),
    Single(serde_yaml::Value),
}

/// Split a document into its header block and body.
///
/// Returns `None` when the document does not start with a marker line or the
/// closing marker is missing.
pub fn split_front_matter(content: &str) -> Option<FrontMatter<'_>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_line_end = content.find('\n')?;
    if content[..first_line_end].trim_end() != HEADER_MARKER {
        return None;
    }

    let rest = &content[first_line_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == HEADER_MARKER {
            return Some(FrontMatter {
                header: &rest[..offset],
                body: &rest[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    None
}

/// Parse the metadata header of a document.
///
/// Documents without a header yield empty metadata. A header that is not
/// valid YAML yields `Err` with the parser message so callers can decide
/// whether to degrade.
pub fn parse_front_matter(content: &str) -> Result<DocumentMetadata, String> {
    let Some(front_matter) = split_front_matter(content) else {
        return Ok(DocumentMetadata::default());
    };

    if front_matter.header.trim().is_empty() {
        return Ok(DocumentMetadata::default());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(front_matter.header).map_err(|e| e.to_string())?;

    // A header that is a bare scalar or list carries no keys we consume.
    if !value.is_mapping() {
        return Ok(DocumentMetadata::default());
    }

    let raw: RawHeader = serde_yaml::from_value(value).map_err(|e| e.to_string())?;

    let tags = match raw.tags {
        Some(TagsField::List(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(TagsField::Single(value)) => scalar_to_string(&value)
            .map(|s| {
                s.split(|c: char| c == ',' || c.is_whitespace())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        None => Vec::new(),
    };

    Ok(DocumentMetadata::new(
        tags,
        raw.date.as_ref().and_then(scalar_to_string),
        raw.lastmod.as_ref().and_then(scalar_to_string),
    ))
}

/// Render a YAML scalar as a string; non-scalars yield `None`.
fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}
