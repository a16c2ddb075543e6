//! Raw terminal input decoding.
//!
//! [`decode_keys`] splits one chunk of bytes into keys and classifies each
//! with [`decode_chunk`]. [`ChunkReader`] pulls chunks from a byte stream
//! (stdin in raw mode) and hands out the decoded events one at a time; it is
//! the production [`EventSource`].

mod decoder;

pub use decoder::{decode_chunk, decode_keys, split_keys, COMMAND_LETTERS};

use crate::model::TerminalEvent;
use std::collections::VecDeque;
use std::io::{self, Read};
use tracing::trace;

/// Largest chunk read at once.
const CHUNK_SIZE: usize = 64;

/// Anything that yields one [`TerminalEvent`] per call, blocking until input arrives.
pub trait EventSource {
    /// Wait for and classify the next input chunk.
    fn next_event(&mut self) -> io::Result<TerminalEvent>;
}

/// Reads raw byte chunks from a stream and queues the keys they carry.
#[derive(Debug)]
pub struct ChunkReader<R> {
    reader: R,
    pending: VecDeque<TerminalEvent>,
}

impl<R: Read> ChunkReader<R> {
    /// Wrap a byte stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl ChunkReader<io::Stdin> {
    /// Read from the process's standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> EventSource for ChunkReader<R> {
    fn next_event(&mut self) -> io::Result<TerminalEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(event);
        }

        let mut buf = [0u8; CHUNK_SIZE];
        let n = loop {
            match self.reader.read(&mut buf) {
                Ok(n) => break n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        };

        let events = decode_keys(&buf[..n]);
        trace!(bytes = ?&buf[..n], ?events, "Decoded input chunk");
        self.pending.extend(events);
        // decode_keys never returns an empty list.
        Ok(self.pending.pop_front().unwrap_or(TerminalEvent::Quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Reader returning one scripted chunk per `read` call.
    struct Chunks(VecDeque<Vec<u8>>);

    impl Read for Chunks {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                None => Ok(0),
            }
        }
    }

    #[test]
    fn reader_decodes_one_event_per_chunk() {
        let chunks = vec![b"\x1b[B".to_vec(), b"7".to_vec(), b"\r".to_vec()];
        let mut reader = ChunkReader::new(Chunks(chunks.into()));

        assert_eq!(reader.next_event().unwrap(), TerminalEvent::MoveDown);
        assert_eq!(reader.next_event().unwrap(), TerminalEvent::Digit(7));
        assert_eq!(reader.next_event().unwrap(), TerminalEvent::Commit);
    }

    #[test]
    fn keys_sharing_a_read_are_all_delivered() {
        // GIVEN a paste and a burst of arrows, each arriving in one read
        let chunks = vec![b"12\r".to_vec(), b"\x1b[B\x1b[B".to_vec()];
        let mut reader = ChunkReader::new(Chunks(chunks.into()));

        // WHEN draining the reader
        let events: Vec<TerminalEvent> = (0..6).map(|_| reader.next_event().unwrap()).collect();

        // THEN every key comes out in order, then end of input
        assert_eq!(
            events,
            vec![
                TerminalEvent::Digit(1),
                TerminalEvent::Digit(2),
                TerminalEvent::Commit,
                TerminalEvent::MoveDown,
                TerminalEvent::MoveDown,
                TerminalEvent::Quit,
            ]
        );
    }

    #[test]
    fn closed_stream_reads_as_quit() {
        let mut reader = ChunkReader::new(Chunks(VecDeque::new()));
        assert_eq!(reader.next_event().unwrap(), TerminalEvent::Quit);
    }
}
