use std::fmt;

use serde::Serialize;

/// The five named entities understood by the model, with the character each
/// one stands for.
pub const NAMED_ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&quot;", '"'),
    ("&apos;", '\''),
    ("&lt;", '<'),
    ("&gt;", '>'),
];

/// Character data that is guaranteed to be escaped for embedding in markup.
///
/// A `Text` keeps both the decoded value and its escaped form. Two texts are
/// equal when their decoded values are equal, regardless of how they were
/// constructed.
#[derive(Debug, Clone, Serialize)]
pub struct Text {
    value: String,
    encoded: String,
}

impl Text {
    /// Wrap a plain string, escaping it once.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let encoded = Self::encode(&value);
        Self { value, encoded }
    }

    /// Wrap a string that is already escaped. It is written out verbatim.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        let encoded = encoded.into();
        let value = Self::decode(&encoded);
        Self { value, encoded }
    }

    /// The decoded character data.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The escaped form, as written into markup.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Append the escaped form to `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push_str(&self.encoded);
    }

    /// Escape `& " ' < >` as named entities.
    ///
    /// Not idempotent: `encode("&amp;")` is `"&amp;amp;"`.
    #[must_use]
    pub fn encode(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&apos;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                _ => out.push(ch),
            }
        }
        out
    }

    /// Replace the five named entities with their characters.
    ///
    /// Any other `&...;` sequence is left untouched.
    #[must_use]
    pub fn decode(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(amp) = rest.find('&') {
            out.push_str(&rest[..amp]);
            rest = &rest[amp..];
            match NAMED_ENTITIES
                .iter()
                .find(|(entity, _)| rest.starts_with(entity))
            {
                Some((entity, ch)) => {
                    out.push(*ch);
                    rest = &rest[entity.len()..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Text {}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
