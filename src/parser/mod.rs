//! ANSI color escape sequence recognizer
//!
//! A stateful recognizer that splits a byte stream into plain text bytes and
//! complete `ESC ... m` sequences, classifying each sequence as a 24-bit
//! foreground color, a plain reset, or something to pass through untouched.

mod actions;
mod sequence;
mod state;

pub use actions::{Action, Sequence};
pub use sequence::{classify, RESET, RGB_PREFIX};
pub use state::{Recognizer, DEFAULT_MAX_SEQUENCE_LEN, ESC, SGR_FINAL};
