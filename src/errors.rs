//! Error types for the tablature editor
//!
//! Structural violations (`ShapeMismatch`) abort the mutating call before any
//! part of the tree changes. Absent history entries, deduplicated saves and
//! refused undos are ordinary outcomes and never appear here.

use thiserror::Error;

/// Errors raised by document mutations, navigation and encoding
#[derive(Debug, Error)]
pub enum TabError {
    /// A measure's string count disagrees with its section's string names
    #[error("shape mismatch: section has {expected} strings but measure has {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// A level of the tree that must hold at least one entry is empty
    #[error("{0} must not be empty")]
    EmptyLevel(&'static str),

    /// A typed fret digit was outside 0-9
    #[error("invalid fret digit: {0} (must be 0-9)")]
    InvalidDigit(u32),

    /// The typed digit plus the capo does not fit in a fret number
    #[error("fret overflow: digit {digit} with capo {capo}")]
    FretOverflow { digit: u32, capo: u32 },

    /// Selection coordinates no longer address the document
    #[error("selection points outside the tab (section {section}, measure {measure})")]
    StaleSelection { section: usize, measure: usize },

    /// The remote sink rejected or failed to receive the document
    #[error("remote sync to {endpoint} failed: {reason}")]
    RemoteSync { endpoint: String, reason: String },

    /// Encoding or decoding the document failed
    #[error("document codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration values that cannot build a valid document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("startStrings is {start_strings} but {names} string names were given")]
    StringCountMismatch { start_strings: usize, names: usize },

    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
}

/// Failures of the key-value store backing the history log
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store could not be reached (e.g. no `window.localStorage`)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("value for key '{0}' is not valid UTF-8")]
    InvalidUtf8(String),
}

/// Failures of the history log itself (not absent or refused entries)
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The history record could not be encoded or decoded
    #[error("history record codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// A snapshot could not be encoded, or decoded into a valid tab
    #[error("snapshot error: {0}")]
    Document(#[from] TabError),
}
