//! Line-mode query prompt, used while the terminal is in cooked mode.

use std::io::{self, BufRead, Write};

/// Asks the user for a search query.
pub trait QueryPrompt {
    /// Read one query. `None` means the user cancelled (empty line or end of
    /// input).
    fn read_query(&mut self) -> io::Result<Option<String>>;
}

/// Prompt on a writer, answer from a line reader.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    /// Prompt on `output`, read the answer from `input`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> QueryPrompt for LinePrompt<R, W> {
    fn read_query(&mut self) -> io::Result<Option<String>> {
        prompt_once(&mut self.input, &mut self.output)
    }
}

/// Prompt on the process's standard streams.
///
/// Stdin is locked only for the duration of one prompt so the raw input
/// reader can use it afterwards.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl QueryPrompt for StdinPrompt {
    fn read_query(&mut self) -> io::Result<Option<String>> {
        prompt_once(&mut io::stdin().lock(), &mut io::stdout())
    }
}

fn prompt_once(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<Option<String>> {
    write!(output, "Search query (empty to cancel): ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let query = line.trim();
    Ok((!query.is_empty()).then(|| query.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (Option<String>, String) {
        let mut output = Vec::new();
        let answer = LinePrompt::new(input.as_bytes(), &mut output)
            .read_query()
            .unwrap();
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn reads_trimmed_query_after_prompt() {
        let (answer, shown) = ask("  async runtime \n");
        assert_eq!(answer.as_deref(), Some("async runtime"));
        assert!(shown.starts_with("Search query"));
    }

    #[test]
    fn empty_line_cancels() {
        assert_eq!(ask("\n").0, None);
        assert_eq!(ask("   \r\n").0, None);
    }

    #[test]
    fn end_of_input_cancels() {
        assert_eq!(ask("").0, None);
    }
}
