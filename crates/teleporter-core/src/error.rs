//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    /// Malformed input: missing name, cross-scene region, duplicate insert,
    /// bad permutation, ladder mode on a singleton group.
    #[error("validation error: {0}")]
    Validation(String),

    /// An unknown group, a source region outside its group, or an
    /// identifier that does not resolve.
    #[error("not found: {0}")]
    NotFound(String),

    /// A positional index outside the current group length.
    #[error("index {index} is out of range for a group of {len} regions")]
    Index {
        /// The offending index.
        index: usize,
        /// The group length at the time of the call.
        len: usize,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
