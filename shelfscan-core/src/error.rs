//! Error types for Shelfscan Core

use thiserror::Error;

/// A raw input that failed identifier validation.
///
/// Carries the original input verbatim so callers can display or log exactly
/// what was attempted; the structured reason lets the orchestrator decide
/// once whether the rejection is user-visible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier {raw:?}: {reason}")]
pub struct InvalidIsbn {
    /// The original input, unchanged
    pub raw: String,

    /// Why validation rejected it
    pub reason: RejectReason,
}

/// Structured rejection reason from the identifier normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("no digits found")]
    Empty,

    #[error("expected 10 or 13 digits, found {0}")]
    BadLength(usize),

    #[error("check character X is only valid as the last character of an ISBN-10")]
    MisplacedCheckCharacter,
}
