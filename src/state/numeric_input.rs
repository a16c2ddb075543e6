//! Pending digits for the jump-to-index input on the results list.

/// Buffer of digits typed on the results list.
///
/// The buffered number is a 1-based result index. It is cleared by any
/// non-digit event and after a successful commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumericInput {
    digits: String,
}

impl NumericInput {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one digit (0-9).
    pub fn push(&mut self, digit: u8) {
        debug_assert!(digit <= 9, "digit out of range: {digit}");
        self.digits.push(char::from(b'0' + digit));
    }

    /// Drop all pending digits.
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Whether no digits are pending.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Pending digits as typed.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Zero-based index for the buffered number, if it names one of `len` results.
    ///
    /// Returns `None` when the buffer is empty, zero, too large, or overflows.
    pub fn target_index(&self, len: usize) -> Option<usize> {
        let number = self.digits.parse::<usize>().ok()?;
        (1..=len).contains(&number).then(|| number - 1)
    }
}
