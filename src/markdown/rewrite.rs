//! Source rewrites applied before markdown rendering.
//!
//! Vault documents use a few forms plain markdown does not know:
//!
//! - `[[target]]` / `[[target|label]]` cross references become inline links
//! - `#tag` inline tags become emphasized code spans
//! - a leading metadata header becomes a fenced `yaml` block
//!
//! Text inside fenced code blocks is left alone.

use crate::parser::split_front_matter;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static WIKI_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]|]+?)(?:\|([^\[\]]+?))?\]\]").expect("wiki link pattern is valid")
});

static INLINE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[\s(\[,])#([\p{L}_][\p{L}\p{N}_/-]*)").expect("tag pattern is valid")
});

const FENCE: &str = "```";

/// Apply all rewrites to a whole document.
pub fn rewrite_document(content: &str) -> String {
    let (header, body) = match split_front_matter(content) {
        Some(front) => (Some(front.header), front.body),
        None => (None, content),
    };

    let mut out = String::with_capacity(content.len() + 32);
    if let Some(header) = header {
        out.push_str(&header_as_code_block(header));
    }

    let mut in_fence = false;
    for line in body.split_inclusive('\n') {
        if line.trim_start().starts_with(FENCE) {
            in_fence = !in_fence;
            out.push_str(line);
        } else if in_fence {
            out.push_str(line);
        } else {
            out.push_str(&rewrite_tags(&rewrite_links(line)));
        }
    }
    out
}

/// Turn a raw header into a fenced `yaml` block.
pub fn header_as_code_block(header: &str) -> String {
    let mut block = format!("{FENCE}yaml\n{header}");
    if !header.is_empty() && !header.ends_with('\n') {
        block.push('\n');
    }
    block.push_str(FENCE);
    block.push_str("\n\n");
    block
}

/// `[[note]]` -> `[note](<note>)`, `[[note|label]]` -> `[label](<note>)`.
pub fn rewrite_links(text: &str) -> String {
    WIKI_LINK
        .replace_all(text, |caps: &Captures<'_>| {
            let target = caps[1].trim();
            let label = caps.get(2).map_or(target, |m| m.as_str().trim());
            format!("[{label}](<{target}>)")
        })
        .into_owned()
}

/// `#tag` -> `` *`#tag`* ``. Headings (`# Title`) and `a#b` are not tags.
pub fn rewrite_tags(text: &str) -> String {
    INLINE_TAG
        .replace_all(text, |caps: &Captures<'_>| {
            format!("{}*`#{}`*", &caps[1], &caps[2])
        })
        .into_owned()
}
