use std::fmt;

use trellis_dom::{Attributes, Element};
use trellis_format::{FormatOptions, Formatter};

use crate::tag::Tag;

/// An `html` root element with an optional prefix line, such as the XML
/// declaration or a DOCTYPE, written before it.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlDocument {
    prefix: Option<String>,
    root: Element,
}

impl HtmlDocument {
    /// A document whose root is an empty `html` element.
    pub fn new(attributes: impl Into<Attributes>) -> Self {
        Self {
            prefix: None,
            root: Tag::Html.create(attributes),
        }
    }

    /// Set the line written before the root element.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Replace or clear the prefix line.
    pub fn set_prefix(&mut self, prefix: Option<String>) {
        self.prefix = prefix;
    }

    /// The prefix line, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The `html` element.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the `html` element.
    pub const fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Consume the document and return its root.
    #[must_use]
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Append the compact serialization, prefix line first.
    pub fn write_to(&self, out: &mut String) {
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
            out.push('\n');
        }
        self.root.write_to(out);
    }

    /// Indented serialization, prefix line first.
    #[must_use]
    pub fn format(&self, mut options: FormatOptions) -> String {
        if let Some(prefix) = &self.prefix {
            options.out.push_str(prefix);
            options.out.push('\n');
        }
        Formatter::write(&self.root, options)
    }
}

impl fmt::Display for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}
