use std::fmt;

use serde::Serialize;

use crate::DomError;

/// A literal markup comment.
///
/// The text is stored as given and serialized as `<!-- text -->`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Comment {
    text: String,
}

impl Comment {
    /// Create a comment.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidComment`] if `text` contains `--`.
    pub fn new(text: impl Into<String>) -> Result<Self, DomError> {
        let text = text.into();
        if text.contains("--") {
            return Err(DomError::InvalidComment(text));
        }
        Ok(Self { text })
    }

    /// The comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append `<!-- text -->` to `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push_str("<!-- ");
        out.push_str(&self.text);
        out.push_str(" -->");
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!-- {} -->", self.text)
    }
}
