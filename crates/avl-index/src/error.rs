use thiserror::Error;

use crate::types::Key;

/// Errors reported by tree operations and the record loader.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The operation needs a populated tree (or, for `create`, an empty one).
    #[error("invalid tree")]
    InvalidTree,
    /// A node handle is absent or refers to a released slot.
    #[error("invalid node")]
    InvalidNode,
    /// Key out of range, or a key field that is not a number.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Malformed record source. `line` is 1-based, 0 when the whole source is unreadable.
    #[error("invalid file (line {line}): {reason}")]
    InvalidFile { line: usize, reason: String },
    #[error("key {0} already exists")]
    KeyExists(Key),
    #[error("key {0} not found")]
    KeyNotFound(Key),
}

pub type Result<T> = std::result::Result<T, Error>;
