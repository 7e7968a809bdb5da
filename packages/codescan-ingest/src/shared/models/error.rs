//! Error types for codescan-ingest

use std::fmt;
use thiserror::Error;

/// Ingestion error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Database errors (SQLite adapter, row decoding)
    Database,
    /// More than one persisted component satisfies a uuid-path lookup
    AmbiguousMatch,
    /// Internal errors (poisoned locks, broken invariants)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Database => "database",
            ErrorKind::AmbiguousMatch => "ambiguous_match",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ingestion error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct IngestError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl IngestError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn ambiguous_match(module_uuid_path: &str, relative_path: &str) -> Self {
        Self::new(
            ErrorKind::AmbiguousMatch,
            format!(
                "more than one component stored under module path {} with relative path {:?}",
                module_uuid_path, relative_path
            ),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

// SQLite error conversions
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for IngestError {
    fn from(err: rusqlite::Error) -> Self {
        IngestError::database(format!("SQLite error: {}", err)).with_source(err)
    }
}

// Poisoned lock in a store adapter
impl<T> From<std::sync::PoisonError<T>> for IngestError {
    fn from(_err: std::sync::PoisonError<T>) -> Self {
        IngestError::internal("lock poisoned")
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, IngestError>;
