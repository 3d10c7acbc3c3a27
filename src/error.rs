//! Error types for conversions

use thiserror::Error;

/// Fatal conditions that abort a conversion.
///
/// Unrecognized escape sequences are not errors: they are copied through
/// to the output unchanged.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot grow storage to {requested} entries")]
    AllocationFailure { requested: usize },

    #[error("escape sequence exceeded {limit} bytes")]
    SequenceTooLong { limit: usize },

    #[error("too many distinct colors, name for index {index} needs more than {max_digits} digits")]
    NamingCapacityExceeded { index: usize, max_digits: usize },

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for conversions
pub type Result<T> = std::result::Result<T, Error>;
