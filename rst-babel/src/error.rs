//! Diagnostics recorded during conversion

use thiserror::Error;

/// A non-fatal problem noticed while building a document.
///
/// Conversion never aborts: the builder records one of these, recovers locally, and carries on.
/// Callers decide whether to log them or fail a build on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// An element kind the converter does not handle; a placeholder was emitted instead.
    #[error("unrecognized element <{tag}> replaced by a placeholder")]
    Unrecognized { tag: String },
    /// An event the context stack could not accept; it was ignored.
    #[error("{event} ignored: {reason}")]
    Structural { event: String, reason: String },
    /// Containers still open at end of document; they were force-closed.
    #[error("{count} container(s) still open at end of document")]
    Unclosed { count: usize },
}

impl Diagnostic {
    pub(crate) fn structural(event: &str, reason: impl Into<String>) -> Self {
        Diagnostic::Structural {
            event: event.to_string(),
            reason: reason.into(),
        }
    }
}
