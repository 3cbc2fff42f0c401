//! Errors raised while building a syllable table.

use thiserror::Error;

/// Errors that can occur while parsing or validating a syllable table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A table line has no key before the first comma.
    #[error("line {line}: empty unit key")]
    EmptyKey { line: usize },

    /// A spelling field is empty (e.g. `shi,,si`).
    #[error("line {line}: empty spelling for unit {key:?}")]
    EmptySpelling { line: usize, key: String },

    /// The same key was declared twice.
    #[error("duplicate unit key {0:?}")]
    DuplicateKey(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
