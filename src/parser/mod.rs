//! Pure parsers for search tool output and document headers.
//!
//! Nothing in this module touches the filesystem; callers hand in text.

pub mod front_matter;
pub mod search_output;

pub use front_matter::{parse_front_matter, split_front_matter, FrontMatter, HEADER_MARKER};
pub use search_output::{parse_search_line, SearchLine};
