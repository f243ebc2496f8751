use std::ptr;

use trellis_dom::{Element, Kind, Name, ProviderOptions};

/// Selects elements whose subtree is written without injected whitespace.
#[derive(Debug, Clone)]
pub enum Preserver {
    /// Elements with exactly this name.
    Name(Name),
    /// Elements of this kind or of a kind derived from it.
    Kind(&'static Kind),
}

impl Preserver {
    /// Whether `element` is selected.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Name(name) => element.name() == name,
            Self::Kind(kind) => element.kind().is_a(kind),
        }
    }
}

impl PartialEq for Preserver {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Name(a), Self::Name(b)) => a == b,
            (Self::Kind(a), Self::Kind(b)) => ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl Eq for Preserver {}

impl From<&str> for Preserver {
    fn from(name: &str) -> Self {
        Self::Name(Name::from(name))
    }
}

impl From<String> for Preserver {
    fn from(name: String) -> Self {
        Self::Name(Name::from(name))
    }
}

impl From<Name> for Preserver {
    fn from(name: Name) -> Self {
        Self::Name(name)
    }
}

impl From<&'static Kind> for Preserver {
    fn from(kind: &'static Kind) -> Self {
        Self::Kind(kind)
    }
}

/// Options for [`Formatter`](crate::Formatter).
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Buffer the output is appended to. Returned by `Formatter::write`.
    pub out: String,
    /// One level of indentation.
    pub indent: String,
    /// Elements written compactly.
    pub preservers: Vec<Preserver>,
    /// Handed to deferred content providers at write time.
    pub extra: ProviderOptions,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            out: String::new(),
            indent: "  ".to_string(),
            preservers: Vec::new(),
            extra: ProviderOptions::new(),
        }
    }
}

impl FormatOptions {
    /// Append to an existing buffer instead of a fresh one.
    #[must_use]
    pub fn with_out(mut self, out: String) -> Self {
        self.out = out;
        self
    }

    /// Use `indent` as the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Add a preserve selector.
    #[must_use]
    pub fn with_preserver(mut self, preserver: impl Into<Preserver>) -> Self {
        self.preservers.push(preserver.into());
        self
    }

    /// Add several preserve selectors.
    #[must_use]
    pub fn with_preservers(mut self, preservers: impl IntoIterator<Item = Preserver>) -> Self {
        self.preservers.extend(preservers);
        self
    }

    /// Add a provider option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.extra.insert(key.into(), value.into());
        self
    }

    /// Whether `element` is written compactly under these options.
    #[must_use]
    pub fn preserves(&self, element: &Element) -> bool {
        element.is_preserve_space() || self.preservers.iter().any(|p| p.matches(element))
    }
}
