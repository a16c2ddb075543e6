//! Domain model types (pure).
//!
//! All types in this module are pure data. Nothing here performs I/O.

pub mod error;
pub mod metadata;
pub mod search_result;
pub mod terminal_event;

// Re-export for convenience
pub use error::{AppError, EditorError, MetadataError, SearchError};
pub use metadata::DocumentMetadata;
pub use search_result::{MatchExcerpt, SearchResult};
pub use terminal_event::TerminalEvent;
