//! Byte chunk classification.
//!
//! A read from the terminal may carry several keys at once (pasted text,
//! arrows queued during a slow redraw). [`split_keys`] cuts a chunk into
//! single-key tokens and [`decode_chunk`] classifies each token.

use crate::model::TerminalEvent;

/// Letters that act as commands somewhere in the UI.
pub const COMMAND_LETTERS: &[char] = &['q', 'm', 'o', 'p', 'r', 's', 't'];

const ARROW_UP: &[&[u8]] = &[b"\x1b[A", b"\x1bOA"];
const ARROW_DOWN: &[&[u8]] = &[b"\x1b[B", b"\x1bOB"];
const CTRL_C: u8 = 0x03;
const ESC: u8 = 0x1b;

/// Classify one key token.
///
/// - `ESC [ A` / `ESC O A` and `ESC [ B` / `ESC O B` are the arrow keys
/// - a lone `\r` or `\n` commits
/// - a lone ASCII digit is `Digit`
/// - a lone command letter is `Letter`
/// - Ctrl-C and an empty chunk (end of input) are `Quit`
/// - everything else, including other escape sequences, is `Unrecognized`
pub fn decode_chunk(chunk: &[u8]) -> TerminalEvent {
    if ARROW_UP.contains(&chunk) {
        return TerminalEvent::MoveUp;
    }
    if ARROW_DOWN.contains(&chunk) {
        return TerminalEvent::MoveDown;
    }

    match chunk {
        [] | [CTRL_C] => TerminalEvent::Quit,
        [b'\r'] | [b'\n'] | [b'\r', b'\n'] => TerminalEvent::Commit,
        [b @ b'0'..=b'9'] => TerminalEvent::Digit(b - b'0'),
        [b] if COMMAND_LETTERS.contains(&char::from(*b)) => TerminalEvent::Letter(char::from(*b)),
        _ => TerminalEvent::Unrecognized,
    }
}

/// Decode every key in a chunk, in order.
///
/// An empty chunk (end of input) decodes to a single `Quit`.
pub fn decode_keys(chunk: &[u8]) -> Vec<TerminalEvent> {
    if chunk.is_empty() {
        return vec![TerminalEvent::Quit];
    }
    split_keys(chunk).into_iter().map(decode_chunk).collect()
}

/// Split a chunk into single-key tokens.
///
/// A token is a CSI sequence (`ESC [` params final), an SS3 sequence
/// (`ESC O` x), `\r\n`, one UTF-8 encoded character, or a single byte.
pub fn split_keys(chunk: &[u8]) -> Vec<&[u8]> {
    let mut tokens = Vec::new();
    let mut rest = chunk;
    while !rest.is_empty() {
        let len = key_len(rest);
        let (token, tail) = rest.split_at(len);
        tokens.push(token);
        rest = tail;
    }
    tokens
}

/// Length of the key token at the start of `bytes` (non-empty).
fn key_len(bytes: &[u8]) -> usize {
    match bytes {
        [ESC, b'[', tail @ ..] => {
            // Parameter and intermediate bytes, then one final byte.
            let params = tail.iter().take_while(|b| (0x20..=0x3f).contains(*b)).count();
            match tail.get(params) {
                Some(b) if (0x40..=0x7e).contains(b) => params + 3,
                _ => params + 2,
            }
        }
        [ESC, b'O', _, ..] => 3,
        [b'\r', b'\n', ..] => 2,
        [lead, tail @ ..] if *lead >= 0xc0 => {
            1 + tail
                .iter()
                .take_while(|b| (0x80..=0xbf).contains(*b))
                .take(3)
                .count()
        }
        _ => 1,
    }
}
