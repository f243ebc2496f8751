//! Error types for the element tree.

use thiserror::Error;

use crate::Name;

/// Errors raised by the data model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Comment text contains the `--` sequence, which would end the comment
    /// early once serialized.
    #[error("comment text must not contain \"--\": {0:?}")]
    InvalidComment(String),

    /// The element's kind does not permit the requested operation.
    #[error("operation `{operation}` is not supported by <{name}> elements of kind `{kind}`")]
    Unsupported {
        /// The operation that was attempted.
        operation: &'static str,
        /// Name of the element it was attempted on.
        name: Name,
        /// Name of the element's kind.
        kind: &'static str,
    },
}
