//! Outer main menu.

use crate::model::TerminalEvent;

/// Command chosen on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Prompt for a query and start a search session.
    Search,
    /// Show vault-wide tag usage.
    Tags,
    /// Leave the program.
    Quit,
    /// Nothing to do.
    None,
}

/// Main menu state: a notice line shown above the commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainMenu {
    notice: Option<String>,
}

impl MainMenu {
    /// Create a menu with no notice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Message shown on the menu, typically the last failure.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Replace the notice.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Map an input event to a command.
    ///
    /// Any command clears the notice.
    pub fn handle(&mut self, event: TerminalEvent) -> MenuCommand {
        let command = match event {
            TerminalEvent::Letter('s') => MenuCommand::Search,
            TerminalEvent::Letter('t') => MenuCommand::Tags,
            TerminalEvent::Letter('q') | TerminalEvent::Quit => MenuCommand::Quit,
            _ => MenuCommand::None,
        };

        if command != MenuCommand::None {
            self.notice = None;
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_commands() {
        let mut menu = MainMenu::new();
        assert_eq!(menu.handle(TerminalEvent::Letter('s')), MenuCommand::Search);
        assert_eq!(menu.handle(TerminalEvent::Letter('t')), MenuCommand::Tags);
        assert_eq!(menu.handle(TerminalEvent::Letter('q')), MenuCommand::Quit);
        assert_eq!(menu.handle(TerminalEvent::Quit), MenuCommand::Quit);
    }

    #[test]
    fn other_events_do_nothing_and_keep_notice() {
        let mut menu = MainMenu::new();
        menu.set_notice("No results for 'x'");

        for event in [
            TerminalEvent::MoveDown,
            TerminalEvent::Commit,
            TerminalEvent::Digit(1),
            TerminalEvent::Letter('m'),
            TerminalEvent::Unrecognized,
        ] {
            assert_eq!(menu.handle(event), MenuCommand::None);
        }
        assert_eq!(menu.notice(), Some("No results for 'x'"));
    }

    #[test]
    fn command_clears_notice() {
        let mut menu = MainMenu::new();
        menu.set_notice("Search failed");
        menu.handle(TerminalEvent::Letter('t'));
        assert_eq!(menu.notice(), None);
    }
}
