//! Recognizer State Machine
//!
//! Two states:
//! - Idle: plain text; every byte except ESC is reported as text
//! - InSequence: after ESC; bytes accumulate until the final `m`
//!
//! Once a sequence is finished it is classified exactly once and the
//! recognizer returns to Idle. There is no backtracking: an ESC seen inside
//! a sequence is simply accumulated.
//!
//! The pending buffer is bounded. Real color sequences are a few dozen bytes
//! at most, so reaching the bound means malformed input and the conversion
//! is aborted rather than silently truncated.

use tracing::trace;

use super::actions::{Action, Sequence};
use super::sequence::classify;
use crate::error::{Error, Result};

/// Escape byte that opens a sequence
pub const ESC: u8 = 0x1b;

/// Final byte of an SGR sequence
pub const SGR_FINAL: u8 = b'm';

/// Default bound on the pending buffer
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 256;

/// Recognizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InSequence,
}

/// Escape sequence recognizer
#[derive(Debug)]
pub struct Recognizer {
    state: State,
    /// Bytes since the last ESC, including the ESC itself
    pending: Vec<u8>,
    /// Capacity of the pending buffer; it may hold at most `limit - 1` bytes
    limit: usize,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEQUENCE_LEN)
    }
}

impl Recognizer {
    /// Create a recognizer in the Idle state
    pub fn new(limit: usize) -> Self {
        Self {
            state: State::Idle,
            pending: Vec::with_capacity(limit.min(DEFAULT_MAX_SEQUENCE_LEN)),
            limit,
        }
    }

    /// Process a chunk of bytes, returning actions
    pub fn feed(&mut self, data: &[u8]) -> Result<Vec<Action>> {
        let mut actions = Vec::new();

        for &byte in data {
            if let Some(action) = self.advance(byte)? {
                actions.push(action);
            }
        }

        Ok(actions)
    }

    /// Process a single byte
    pub fn advance(&mut self, byte: u8) -> Result<Option<Action>> {
        match self.state {
            State::Idle => Ok(self.process_idle(byte)),
            State::InSequence => self.process_sequence(byte),
        }
    }

    /// True while a sequence is being accumulated
    pub fn in_sequence(&self) -> bool {
        self.state == State::InSequence
    }

    /// Bytes of the unfinished sequence, if any
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Abandon any unfinished sequence and return to Idle
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.pending.clear();
    }

    fn process_idle(&mut self, byte: u8) -> Option<Action> {
        if byte == ESC {
            self.state = State::InSequence;
            self.pending.clear();
            self.pending.push(byte);
            None
        } else {
            Some(Action::Text(byte))
        }
    }

    fn process_sequence(&mut self, byte: u8) -> Result<Option<Action>> {
        if self.pending.len() + 1 >= self.limit {
            return Err(Error::SequenceTooLong { limit: self.limit });
        }
        self.pending.push(byte);

        if byte != SGR_FINAL {
            return Ok(None);
        }

        let sequence = classify(&self.pending);
        trace!(raw = ?self.pending, ?sequence, "classified sequence");
        self.reset();
        Ok(Some(Action::Sequence(sequence)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_recognizer_text() {
        let mut recognizer = Recognizer::default();
        let actions = recognizer.feed(b"Hi\\").unwrap();

        assert_eq!(
            actions,
            vec![Action::Text(b'H'), Action::Text(b'i'), Action::Text(b'\\')]
        );
    }

    #[test]
    fn test_recognizer_color() {
        let mut recognizer = Recognizer::default();
        let actions = recognizer.feed(b"\x1b[38;2;1;2;3mX").unwrap();

        assert_eq!(actions.len(), 2);
        assert_eq!(
            actions[0],
            Action::Sequence(Sequence::Color(Color::new(1, 2, 3)))
        );
        assert_eq!(actions[1], Action::Text(b'X'));
        assert!(!recognizer.in_sequence());
    }

    #[test]
    fn test_recognizer_reset() {
        let mut recognizer = Recognizer::default();
        let actions = recognizer.feed(b"\x1b[m").unwrap();

        assert_eq!(actions, vec![Action::Sequence(Sequence::Reset)]);
    }

    #[test]
    fn test_recognizer_chunk_boundary() {
        let mut recognizer = Recognizer::default();

        let actions1 = recognizer.feed(b"\x1b[38;2;").unwrap();
        let actions2 = recognizer.feed(b"10;20").unwrap();
        let actions3 = recognizer.feed(b";30m").unwrap();

        assert!(actions1.is_empty());
        assert!(actions2.is_empty());
        assert_eq!(
            actions3,
            vec![Action::Sequence(Sequence::Color(Color::new(10, 20, 30)))]
        );
    }

    #[test]
    fn test_recognizer_nested_esc_is_accumulated() {
        let mut recognizer = Recognizer::default();
        let actions = recognizer.feed(b"\x1b[1\x1b[m").unwrap();

        assert_eq!(
            actions,
            vec![Action::Sequence(Sequence::Unrecognized(
                b"\x1b[1\x1b[m".to_vec()
            ))]
        );
    }

    #[test]
    fn test_recognizer_unterminated_sequence_stays_pending() {
        let mut recognizer = Recognizer::default();
        let actions = recognizer.feed(b"a\x1b[38").unwrap();

        assert_eq!(actions, vec![Action::Text(b'a')]);
        assert!(recognizer.in_sequence());
        assert_eq!(recognizer.pending(), b"\x1b[38");

        recognizer.reset();
        assert!(!recognizer.in_sequence());
        assert!(recognizer.pending().is_empty());
    }

    #[test]
    fn test_recognizer_bound() {
        let mut recognizer = Recognizer::new(8);

        // ESC plus six bytes fills the buffer to limit - 1
        assert!(recognizer.feed(b"\x1b[1;2;3").unwrap().is_empty());
        let err = recognizer.advance(b'm').unwrap_err();
        assert!(matches!(err, Error::SequenceTooLong { limit: 8 }));
    }

    #[test]
    fn test_recognizer_longest_accepted_sequence() {
        let mut recognizer = Recognizer::new(8);
        let actions = recognizer.feed(b"\x1b[1;2;m").unwrap();

        assert_eq!(
            actions,
            vec![Action::Sequence(Sequence::Unrecognized(b"\x1b[1;2;m".to_vec()))]
        );
    }

    #[test]
    fn test_recognizer_huge_limit() {
        let mut recognizer = Recognizer::new(usize::MAX);
        let actions = recognizer.feed(b"\x1b[m").unwrap();

        assert_eq!(actions, vec![Action::Sequence(Sequence::Reset)]);
    }
}
