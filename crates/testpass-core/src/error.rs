//! Engine error types.
//!
//! The engine degrades malformed question data to safe defaults, so the
//! taxonomy is narrow. The variants here are the conditions a caller cannot
//! recover from by retrying the same input.

use thiserror::Error;

/// Errors raised by the question engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An operation was called with an argument it cannot work with,
    /// e.g. drawing a random element from an empty list.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A session lookup named a question that is not part of the attempt.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),
}

impl EngineError {
    /// Returns `true` if the error points at bad question data upstream
    /// rather than at a caller mistake.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, EngineError::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = EngineError::InvalidArgument("empty list".into());
        assert_eq!(err.to_string(), "invalid argument: empty list");
        assert!(err.is_data_integrity());

        let err = EngineError::UnknownQuestion("q-7".into());
        assert_eq!(err.to_string(), "unknown question: q-7");
        assert!(!err.is_data_integrity());
    }
}
