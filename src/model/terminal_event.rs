//! Logical input events produced by the input decoder.

/// One classified input chunk.
///
/// These represent user intent, not raw bytes. The mapping from byte
/// sequences to events lives in [`crate::input::decode_chunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalEvent {
    /// Arrow up.
    MoveUp,
    /// Arrow down.
    MoveDown,
    /// Enter / carriage return.
    Commit,
    /// A decimal digit, 0-9.
    Digit(u8),
    /// One of the command letters.
    Letter(char),
    /// Ctrl-C or end of input: terminate the program.
    Quit,
    /// Anything else.
    Unrecognized,
}

impl TerminalEvent {
    /// Whether this event is the given command letter.
    pub fn is_letter(self, c: char) -> bool {
        self == TerminalEvent::Letter(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_letter_matches_only_same_letter() {
        assert!(TerminalEvent::Letter('q').is_letter('q'));
        assert!(!TerminalEvent::Letter('q').is_letter('m'));
        assert!(!TerminalEvent::Quit.is_letter('q'));
    }
}
