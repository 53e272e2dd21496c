//! Remote error handling
//!
//! Every failure at the gateway boundary collapses into a single
//! `RemoteError` whose display is the operation's fixed reason string.
//! The underlying transport or decoding error, when there is one, is kept
//! as the error source for logging.

use thiserror::Error;

/// The gateway operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// GET the collection
    FetchList,
    /// POST a new record
    Create,
    /// PUT a full record
    Update,
    /// DELETE a record
    Delete,
}

impl Operation {
    /// User-facing reason reported when this operation fails
    pub fn failure_reason(self) -> &'static str {
        match self {
            Operation::FetchList => "Failed to fetch posts",
            Operation::Create => "Failed to create post",
            Operation::Update => "Failed to update post",
            Operation::Delete => "Failed to delete post",
        }
    }
}

/// Failure of a single remote call
#[derive(Error, Debug)]
#[error("{reason}")]
pub struct RemoteError {
    operation: Operation,
    reason: String,
    #[source]
    source: Option<reqwest::Error>,
}

impl RemoteError {
    /// Error for a failed operation, using its standard reason
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            reason: operation.failure_reason().to_string(),
            source: None,
        }
    }

    /// Error for a failed operation caused by a transport or decoding error
    pub fn with_source(operation: Operation, source: reqwest::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(operation)
        }
    }

    /// The operation that failed
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The reason string surfaced to the presentation layer
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Result type for gateway operations
pub type RemoteResult<T> = Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_failure_reasons() {
        assert_eq!(Operation::FetchList.failure_reason(), "Failed to fetch posts");
        assert_eq!(Operation::Create.failure_reason(), "Failed to create post");
        assert_eq!(Operation::Update.failure_reason(), "Failed to update post");
        assert_eq!(Operation::Delete.failure_reason(), "Failed to delete post");
    }

    #[test]
    fn test_display_is_reason() {
        let err = RemoteError::new(Operation::Delete);
        assert_eq!(err.to_string(), "Failed to delete post");
        assert_eq!(err.reason(), "Failed to delete post");
        assert_eq!(err.operation(), Operation::Delete);
        assert!(err.source().is_none());
    }
}
