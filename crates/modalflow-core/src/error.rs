//! Error types for the modal orchestration core

use serde_json::Value;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the modal orchestration layer.
///
/// The type is `Clone` because settlement results travel through shared
/// futures: every caller holding a clone of the same show-future observes
/// the same outcome.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Settlement Errors
    // ─────────────────────────────────────────────────────────────
    /// The component (or some other caller) rejected the modal with an
    /// opaque payload. The payload is carried verbatim and never
    /// inspected or wrapped by the core.
    #[error("modal rejected: {0}")]
    Rejected(Value),

    /// The pending operation was discarded before anyone settled it,
    /// typically because `remove()` tore the modal down while a caller
    /// was still awaiting its result.
    #[error("modal operation abandoned before settlement")]
    Abandoned,

    // ─────────────────────────────────────────────────────────────
    // Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    /// IO failure while bootstrapping infrastructure (e.g. the log
    /// directory). Stored as a string so the error stays `Clone`.
    #[error("IO error: {0}")]
    Io(String),
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Rejection with an opaque payload supplied by the caller
    pub fn rejected(payload: impl Into<Value>) -> Self {
        Self::Rejected(payload.into())
    }

    /// Whether this error is a caller-supplied rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The rejection payload, if this is a rejection
    pub fn rejection_payload(&self) -> Option<&Value> {
        match self {
            Self::Rejected(payload) => Some(payload),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
