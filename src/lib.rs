//! vaultnav
//!
//! Interactive terminal browser for full-text search results over a vault
//! of markdown documents.
//!
//! Follows a Pure Core / Impure Shell architecture:
//! - Pure core: [`model`], [`parser`], [`state`], [`input`] decoding and
//!   [`markdown`] rendering, all testable without a terminal
//! - Impure shell: [`source`] (search process and filesystem),
//!   [`terminal`] (raw mode and editor hand-off) and [`view`] (the app loop)

pub mod aggregator;
pub mod config;
pub mod input;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod terminal;
pub mod view;
