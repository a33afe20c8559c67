//! Persistence error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while talking to the store.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PersistenceErrorKind {
    /// The store could not be read or written.
    #[display("Storage error: {}", _0)]
    Storage(String),
    /// A stored value is not a valid session.
    #[display("Deserialization error: {}", _0)]
    Deserialization(String),
    /// A session could not be encoded.
    #[display("Serialization error: {}", _0)]
    Serialization(String),
}

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct PersistenceError {
    /// Error category and message.
    pub kind: PersistenceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PersistenceError {
    /// Creates a new persistence error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`PersistenceErrorKind::Storage`] error.
    #[track_caller]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(PersistenceErrorKind::Storage(message.into()))
    }

    /// True if the stored value was present but unreadable.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, PersistenceErrorKind::Deserialization(_))
    }
}

impl From<std::io::Error> for PersistenceError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("I/O error: {}", err))
    }
}
