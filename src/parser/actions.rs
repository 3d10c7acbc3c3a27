//! Recognizer Actions
//!
//! What the recognizer reports for each input byte it consumes.

use crate::core::Color;

/// Outcome of feeding one byte to the recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A byte outside any escape sequence, to be copied to the body
    Text(u8),

    /// A complete `ESC ... m` sequence and its classification
    Sequence(Sequence),
}

/// Classification of a complete `ESC ... m` sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sequence {
    /// `ESC[m`
    Reset,

    /// `ESC[38;2;<r>;<g>;<b>...m` with non-negative components
    Color(Color),

    /// Any other sequence, kept byte for byte so it can be copied through
    Unrecognized(Vec<u8>),
}
