use std::fmt;
use std::ptr;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{Comment, Element, Text};

/// Free-form options handed to a [`ContentProvider`] at write time.
pub type ProviderOptions = IndexMap<String, String>;

/// A deferred source of content.
///
/// Placed in a content list through [`Content::deferred`], a provider is
/// asked for its items each time the tree is written, with the writer's
/// options. The items are spliced in at the provider's position.
pub trait ContentProvider: fmt::Debug {
    /// Produce the items to splice in.
    fn contents(&self, options: &ProviderOptions) -> Vec<Content>;
}

/// One item of an element's content list.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Content {
    /// A child element.
    Element(Element),
    /// Escaped character data.
    Text(Text),
    /// A comment.
    Comment(Comment),
    /// A scalar in string form, escaped when written.
    Raw(String),
    /// Content computed at write time.
    #[serde(skip)]
    Deferred(Rc<dyn ContentProvider>),
}

impl Content {
    /// Wrap a provider as a content item.
    pub fn deferred(provider: impl ContentProvider + 'static) -> Self {
        Self::Deferred(Rc::new(provider))
    }

    /// The element, if this item is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Mutable access to the element, if this item is one.
    pub const fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Decoded character data for text and raw items.
    #[must_use]
    pub fn character_data(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.value()),
            Self::Raw(raw) => Some(raw),
            _ => None,
        }
    }

    /// Append the compact serialization of this item.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Self::Element(element) => element.write_to(out),
            Self::Text(text) => text.write_to(out),
            Self::Comment(comment) => comment.write_to(out),
            Self::Raw(raw) => out.push_str(&Text::encode(raw)),
            Self::Deferred(provider) => {
                for item in provider.contents(&ProviderOptions::new()) {
                    item.write_to(out);
                }
            }
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Element(a), Self::Element(b)) => a == b,
            (Self::Comment(a), Self::Comment(b)) => a == b,
            (Self::Deferred(a), Self::Deferred(b)) => ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            _ => match (self.character_data(), other.character_data()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

impl PartialEq<&str> for Content {
    fn eq(&self, other: &&str) -> bool {
        self.character_data() == Some(*other)
    }
}

impl PartialEq<Element> for Content {
    fn eq(&self, other: &Element) -> bool {
        self.as_element() == Some(other)
    }
}

/// Values that can be appended to an element's content list.
///
/// `None` appends nothing and sequences are flattened, so a nested
/// `Vec<Option<_>>` appends exactly its present members in order.
pub trait IntoContent {
    /// Append `self` to `contents`.
    fn push_into(self, contents: &mut Vec<Content>);
}

impl IntoContent for Content {
    fn push_into(self, contents: &mut Vec<Content>) {
        contents.push(self);
    }
}

impl IntoContent for Element {
    fn push_into(self, contents: &mut Vec<Content>) {
        contents.push(Content::Element(self));
    }
}

impl IntoContent for Text {
    fn push_into(self, contents: &mut Vec<Content>) {
        contents.push(Content::Text(self));
    }
}

impl IntoContent for Comment {
    fn push_into(self, contents: &mut Vec<Content>) {
        contents.push(Content::Comment(self));
    }
}

impl IntoContent for Rc<dyn ContentProvider> {
    fn push_into(self, contents: &mut Vec<Content>) {
        contents.push(Content::Deferred(self));
    }
}

impl IntoContent for &str {
    fn push_into(self, contents: &mut Vec<Content>) {
        contents.push(Content::Raw(self.to_string()));
    }
}

impl IntoContent for String {
    fn push_into(self, contents: &mut Vec<Content>) {
        contents.push(Content::Raw(self));
    }
}

macro_rules! into_content_from_display {
    ($($ty:ty),*) => {
        $(
            impl IntoContent for $ty {
                fn push_into(self, contents: &mut Vec<Content>) {
                    contents.push(Content::Raw(self.to_string()));
                }
            }
        )*
    };
}

into_content_from_display!(char, bool, i32, i64, u32, u64, usize, f64);

impl<T: IntoContent> IntoContent for Option<T> {
    fn push_into(self, contents: &mut Vec<Content>) {
        if let Some(value) = self {
            value.push_into(contents);
        }
    }
}

impl<T: IntoContent> IntoContent for Vec<T> {
    fn push_into(self, contents: &mut Vec<Content>) {
        for value in self {
            value.push_into(contents);
        }
    }
}

impl<T: IntoContent, const N: usize> IntoContent for [T; N] {
    fn push_into(self, contents: &mut Vec<Content>) {
        for value in self {
            value.push_into(contents);
        }
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Text> for Content {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl From<Comment> for Content {
    fn from(comment: Comment) -> Self {
        Self::Comment(comment)
    }
}

impl From<&str> for Content {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for Content {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}
