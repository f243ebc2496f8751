use indexmap::IndexMap;
use serde::Serialize;

use crate::{Name, Text};

/// The value stored in an attribute slot.
///
/// Equality is semantic: strings, atoms and pre-encoded text compare on
/// their decoded character data, so `Str("&")` equals
/// `Encoded(Text::from_encoded("&amp;"))` and `Str("get")` equals
/// `Atom(Name("get"))`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Plain string, escaped when written.
    Str(String),
    /// Symbol-like atom, escaped when written.
    Atom(Name),
    /// Boolean. `true` is written as `'true'`, `false` is omitted.
    Bool(bool),
    /// Pre-encoded text, written verbatim.
    Encoded(Text),
    /// Absent value. The attribute is omitted when written.
    Null,
}

impl AttrValue {
    /// Decoded character data, if this value carries any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Atom(name) => Some(name.as_str()),
            Self::Encoded(text) => Some(text.value()),
            Self::Bool(_) | Self::Null => None,
        }
    }

    /// Whether the attribute counts as set (anything but [`AttrValue::Null`]).
    #[must_use]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Null)
    }

    /// Whether the attribute is written at all.
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        !matches!(self, Self::Null | Self::Bool(false))
    }

    /// Append the quoted, escaped value (without the leading `key=`).
    fn write_quoted(&self, out: &mut String) {
        out.push('\'');
        match self {
            Self::Str(s) => out.push_str(&Text::encode(s)),
            Self::Atom(name) => out.push_str(&Text::encode(name.as_str())),
            Self::Encoded(text) => text.write_to(out),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Null => {}
        }
        out.push('\'');
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) => true,
            _ => match (self.text(), other.text()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for AttrValue {}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<Name> for AttrValue {
    fn from(value: Name) -> Self {
        Self::Atom(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Text> for AttrValue {
    fn from(value: Text) -> Self {
        Self::Encoded(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! attr_value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Str(value.to_string())
                }
            }
        )*
    };
}

attr_value_from_display!(char, i32, i64, u32, u64, usize, f64);

/// Insertion-ordered attribute map.
///
/// Keys are canonical [`Name`]s and unique. Order is kept for deterministic
/// output but ignored by equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<Name, AttrValue>);

impl Attributes {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one attribute, returning the previous value.
    pub fn insert(&mut self, key: impl Into<Name>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up one attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Remove one attribute, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.0.shift_remove(key)
    }

    /// Whether the key is present (even with a [`AttrValue::Null`] value).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether the key is present with a value other than [`AttrValue::Null`].
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(AttrValue::is_set)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Name, AttrValue> {
        self.0.iter()
    }

    /// Append ` key='value'` for every rendered attribute.
    ///
    /// `false` and `Null` values are skipped entirely.
    pub fn write_to(&self, out: &mut String) {
        for (key, value) in &self.0 {
            if !value.is_rendered() {
                continue;
            }
            out.push(' ');
            out.push_str(key.as_str());
            out.push('=');
            value.write_quoted(out);
        }
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a Name, &'a AttrValue);
    type IntoIter = indexmap::map::Iter<'a, Name, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<Name>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        attributes.extend(iter);
        attributes
    }
}

impl<K: Into<Name>, V: Into<AttrValue>> Extend<(K, V)> for Attributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ = self.insert(key, value);
        }
    }
}

impl<K: Into<Name>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(attributes: &Attributes) -> String {
        let mut out = String::new();
        attributes.write_to(&mut out);
        out
    }

    #[test]
    fn test_false_and_null_are_omitted() {
        let attributes = Attributes::from([
            ("a", AttrValue::Bool(true)),
            ("b", AttrValue::Bool(false)),
            ("c", AttrValue::Null),
        ]);
        assert_eq!(render(&attributes), " a='true'");
    }

    #[test]
    fn test_values_are_escaped_once() {
        let mut attributes = Attributes::new();
        let _ = attributes.insert("a2", "'\"<>&");
        assert_eq!(render(&attributes), " a2='&apos;&quot;&lt;&gt;&amp;'");
    }

    #[test]
    fn test_encoded_values_are_verbatim() {
        let mut attributes = Attributes::new();
        let _ = attributes.insert("key", Text::from_encoded("&\"'<>"));
        assert_eq!(render(&attributes), " key='&\"'<>'");
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let attributes = Attributes::from([("z", "1"), ("a", "2"), ("m", "3")]);
        assert_eq!(render(&attributes), " z='1' a='2' m='3'");
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Attributes::from([("x", "1"), ("y", "2")]);
        let b = Attributes::from([("y", "2"), ("x", "1")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_semantic_value_equality() {
        assert_eq!(AttrValue::from("&"), AttrValue::from(Text::from_encoded("&amp;")));
        assert_eq!(AttrValue::from("get"), AttrValue::from(Name::from("get")));
        assert_ne!(AttrValue::from("true"), AttrValue::Bool(true));
        assert_ne!(AttrValue::Null, AttrValue::from(""));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut attributes = Attributes::from([("a", "1"), ("b", "2"), ("c", "3")]);
        assert_eq!(attributes.remove("b"), Some(AttrValue::from("2")));
        assert_eq!(render(&attributes), " a='1' c='3'");
        assert_eq!(attributes.remove("b"), None);
    }

    #[test]
    fn test_null_is_present_but_not_set() {
        let attributes = Attributes::from([("nil", AttrValue::Null)]);
        assert!(attributes.contains_key("nil"));
        assert!(!attributes.is_set("nil"));
    }
}
