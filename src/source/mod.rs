//! Search inputs: the corpus on disk and the external search tool.
//!
//! - [`Corpus`] resolves paths, discovers documents and reads headers
//! - [`SearchTool`] abstracts the line-oriented search utility

pub mod corpus;
pub mod search_tool;

pub use corpus::{Corpus, TagCount};
pub use search_tool::{CommandSearchTool, SearchTool, SearchToolKind};
