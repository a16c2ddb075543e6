//! Result navigation state machine.
//!
//! Views and transitions:
//!
//! ```text
//!              t                      Commit                 p
//!   Table <--------- ResultsList ------------> ResultDetail -----> Preview
//!     |  any key        ^    |  m -> ReturnToMenu   |  r / m   ^          |
//!     +-----------------+    |  q -> Quit           |          +----------+
//!                            |                      |  o -> OpenEditor   any key
//!                            +<---------------------+
//! ```
//!
//! A single dispatch point per view handles each event. `Quit` (Ctrl-C or
//! end of input) terminates from every view.

use crate::model::{SearchResult, TerminalEvent};
use crate::state::NumericInput;
use tracing::debug;

/// The interactive view currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Selectable list of result documents.
    ResultsList,
    /// Command menu for one result.
    ResultDetail,
    /// Rendered document, waiting for any key.
    Preview,
    /// All results as a table, waiting for any key.
    Table,
}

/// What the shell must do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redraw and keep reading events.
    Continue,
    /// Hand the terminal to the editor for this corpus-relative path, then redraw.
    OpenEditor(String),
    /// Leave the results session and go back to the main menu.
    ReturnToMenu,
    /// Terminate the program.
    Quit,
}

/// Transient navigation state, owned by [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    view: View,
    selected_index: usize,
    numeric_input: NumericInput,
    /// Index snapshot taken when leaving the results list.
    active_result: Option<usize>,
}

impl NavigationState {
    fn new() -> Self {
        Self {
            view: View::ResultsList,
            selected_index: 0,
            numeric_input: NumericInput::new(),
            active_result: None,
        }
    }

    /// Active view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Highlighted row on the results list.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Digits typed for jump-to-index.
    pub fn numeric_input(&self) -> &NumericInput {
        &self.numeric_input
    }

    /// Index of the result opened in detail/preview.
    pub fn active_index(&self) -> Option<usize> {
        self.active_result
    }
}

/// Drives navigation over an immutable, non-empty result sequence.
#[derive(Debug, Clone)]
pub struct Navigator {
    results: Vec<SearchResult>,
    state: NavigationState,
}

impl Navigator {
    /// Start on the results list with the first result selected.
    ///
    /// Returns `None` for an empty result sequence: there is nothing to
    /// navigate and the caller should return immediately.
    pub fn new(results: Vec<SearchResult>) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        Some(Self {
            results,
            state: NavigationState::new(),
        })
    }

    /// The result sequence being browsed.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Current navigation state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Active view.
    pub fn view(&self) -> View {
        self.state.view
    }

    /// Highlighted row on the results list.
    pub fn selected_index(&self) -> usize {
        self.state.selected_index
    }

    /// Result opened in detail/preview, `None` on the list views.
    pub fn active_result(&self) -> Option<&SearchResult> {
        self.state.active_result.map(|i| &self.results[i])
    }

    /// Whether a record with this corpus-relative path is present.
    pub fn contains_path(&self, path: &str) -> bool {
        self.results.iter().any(|r| r.path == path)
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: TerminalEvent) -> Outcome {
        if event == TerminalEvent::Quit {
            return Outcome::Quit;
        }

        let before = self.state.view;
        let outcome = match before {
            View::ResultsList => self.handle_results_list(event),
            View::ResultDetail => self.handle_detail(event),
            View::Preview => self.handle_preview(),
            View::Table => self.handle_table(),
        };

        if self.state.view != before {
            debug!(from = ?before, to = ?self.state.view, ?event, "View transition");
        }
        outcome
    }

    fn handle_results_list(&mut self, event: TerminalEvent) -> Outcome {
        let len = self.results.len();

        match event {
            TerminalEvent::Digit(d) => {
                self.state.numeric_input.push(d);
                if let Some(index) = self.state.numeric_input.target_index(len) {
                    self.state.selected_index = index;
                }
                return Outcome::Continue;
            }
            TerminalEvent::MoveUp => {
                self.state.selected_index = self.state.selected_index.saturating_sub(1);
            }
            TerminalEvent::MoveDown => {
                if self.state.selected_index + 1 < len {
                    self.state.selected_index += 1;
                }
            }
            TerminalEvent::Commit => {
                // Any buffered index was applied live as the digits arrived.
                self.state.active_result = Some(self.state.selected_index);
                self.state.view = View::ResultDetail;
            }
            TerminalEvent::Letter('q') => return Outcome::Quit,
            TerminalEvent::Letter('m') => {
                self.state.numeric_input.clear();
                return Outcome::ReturnToMenu;
            }
            TerminalEvent::Letter('t') => {
                self.state.view = View::Table;
            }
            _ => {}
        }

        self.state.numeric_input.clear();
        Outcome::Continue
    }

    fn handle_detail(&mut self, event: TerminalEvent) -> Outcome {
        match event {
            TerminalEvent::Letter('o') => match self.active_result() {
                Some(result) => Outcome::OpenEditor(result.path.clone()),
                None => Outcome::ReturnToMenu,
            },
            TerminalEvent::Letter('p') => {
                self.state.view = View::Preview;
                Outcome::Continue
            }
            // 'm' returns to the results list here, same as 'r'.
            TerminalEvent::Letter('r') | TerminalEvent::Letter('m') => {
                self.state.active_result = None;
                self.state.view = View::ResultsList;
                Outcome::Continue
            }
            _ => Outcome::Continue,
        }
    }

    fn handle_preview(&mut self) -> Outcome {
        self.state.view = View::ResultDetail;
        Outcome::Continue
    }

    fn handle_table(&mut self) -> Outcome {
        self.state.view = View::ResultsList;
        Outcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentMetadata, MatchExcerpt};

    fn result(path: &str) -> SearchResult {
        SearchResult::new(
            path.trim_end_matches(".md"),
            path,
            MatchExcerpt::new(1, "hit"),
            DocumentMetadata::default(),
        )
    }

    #[test]
    fn empty_results_do_not_start_navigation() {
        assert!(Navigator::new(Vec::new()).is_none());
    }

    #[test]
    fn starts_on_results_list_at_first_entry() {
        let nav = Navigator::new(vec![result("a.md"), result("b.md")]).unwrap();
        assert_eq!(nav.view(), View::ResultsList);
        assert_eq!(nav.selected_index(), 0);
        assert!(nav.active_result().is_none());
    }

    #[test]
    fn contains_path_checks_records() {
        let nav = Navigator::new(vec![result("a.md")]).unwrap();
        assert!(nav.contains_path("a.md"));
        assert!(!nav.contains_path("b.md"));
    }
}
