use thiserror::Error;

/// Errors raised by the XHTML catalog.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum XhtmlError {
    /// A heading level outside `1..=6`.
    #[error("heading level {0} is outside 1..=6")]
    HeadingLevel(u8),
}
