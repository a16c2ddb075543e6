//! UI state machines (pure).
//!
//! All state transitions are pure functions of the current state and one
//! [`TerminalEvent`](crate::model::TerminalEvent), testable without a TUI.
//! Side effects (editor launch, leaving the session) are returned as
//! [`Outcome`] values for the impure shell in [`crate::view`] to carry out.

pub mod main_menu;
pub mod navigation;
pub mod numeric_input;


// Re-export for convenience
pub use main_menu::{MainMenu, MenuCommand};
pub use navigation::{NavigationState, Navigator, Outcome, View};
pub use numeric_input::NumericInput;
