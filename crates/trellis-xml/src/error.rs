use thiserror::Error;
use trellis_dom::Name;

/// Errors raised while parsing markup.
///
/// Parsing is all-or-nothing: an error means no tree is returned for the
/// node being parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A node was expected but none could be recognised.
    #[error("Syntax error.")]
    Syntax {
        /// Byte offset where recognition failed.
        offset: usize,
    },

    /// An end tag does not close the innermost open element.
    #[error("End tag mismatched.")]
    EndTagMismatch {
        /// Name of the element that is open.
        expected: Name,
        /// Name found in the end tag.
        found: String,
        /// Byte offset of the end tag.
        offset: usize,
    },

    /// A comment contains `--` before its terminator.
    #[error("Invalid comment.")]
    InvalidComment {
        /// Byte offset of the comment.
        offset: usize,
    },
}

impl ParseError {
    /// Byte offset in the input where the error was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Syntax { offset }
            | Self::EndTagMismatch { offset, .. }
            | Self::InvalidComment { offset } => *offset,
        }
    }
}
