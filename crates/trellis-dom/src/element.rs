use std::collections::HashSet;
use std::fmt;
use std::mem;
use std::ops::Index;

use serde::Serialize;

use crate::kind::{self, Kind};
use crate::{AttrValue, Attributes, Content, DomError, IntoContent, Name};

/// A named tree node with ordered attributes and mixed content.
///
/// Equality is structural over name, attributes, contents and the
/// preserve-space flag. The [`Kind`] is a type tag for queries and does not
/// take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    name: Name,
    attributes: Attributes,
    contents: Vec<Content>,
    preserve_space: bool,
    #[serde(skip)]
    kind: &'static Kind,
}

impl Element {
    /// Create an element with no attributes and no content.
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            contents: Vec::new(),
            preserve_space: false,
            kind: &kind::ELEMENT,
        }
    }

    /// Create an element with the given attributes.
    pub fn with_attributes(name: impl Into<Name>, attributes: impl Into<Attributes>) -> Self {
        let mut element = Self::new(name);
        element.attributes = attributes.into();
        element
    }

    /// Create an element of a specific kind.
    ///
    /// Used by element catalogs to tag what they construct.
    pub fn of_kind(kind: &'static Kind, name: impl Into<Name>, attributes: impl Into<Attributes>) -> Self {
        let mut element = Self::with_attributes(name, attributes);
        element.kind = kind;
        element
    }

    /// Run an initializer against the new element and return it.
    ///
    /// ```
    /// use trellis_dom::Element;
    ///
    /// let base = Element::new("base").init(|b| {
    ///     let _ = b.set_attribute("attr", "value");
    ///     let _ = b.add(Element::new("sub"));
    /// });
    /// assert_eq!(base.to_string(), "<base attr='value'><sub /></base>");
    /// ```
    #[must_use]
    pub fn init(mut self, init: impl FnOnce(&mut Self)) -> Self {
        init(&mut self);
        self
    }

    /// The element name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// The element's kind.
    #[must_use]
    pub const fn kind(&self) -> &'static Kind {
        self.kind
    }

    /// Change the element name.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Unsupported`] unless the element's kind was
    /// declared [`renamable`](Kind::renamable).
    pub fn rename(&mut self, name: impl Into<Name>) -> Result<(), DomError> {
        if !self.kind.is_renamable() {
            return Err(DomError::Unsupported {
                operation: "rename",
                name: self.name.clone(),
                kind: self.kind.name(),
            });
        }
        self.name = name.into();
        Ok(())
    }

    /// The attribute map.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The content list.
    #[must_use]
    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    /// Mutable access to the content list.
    pub const fn contents_mut(&mut self) -> &mut Vec<Content> {
        &mut self.contents
    }

    /// Append content. `None` is skipped and sequences are flattened.
    pub fn add(&mut self, value: impl IntoContent) -> &mut Self {
        value.push_into(&mut self.contents);
        self
    }

    /// By-value form of [`add`](Self::add), for building trees in one
    /// expression.
    #[must_use]
    pub fn child(mut self, value: impl IntoContent) -> Self {
        value.push_into(&mut self.contents);
        self
    }

    /// Set one attribute, returning the previous value.
    pub fn set_attribute(&mut self, key: impl Into<Name>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.attributes.insert(key, value)
    }

    /// By-value form of [`set_attribute`](Self::set_attribute).
    #[must_use]
    pub fn attr(mut self, key: impl Into<Name>, value: impl Into<AttrValue>) -> Self {
        let _ = self.attributes.insert(key, value);
        self
    }

    /// Look up one attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Remove one attribute, returning its value.
    pub fn del_attribute(&mut self, key: &str) -> Option<AttrValue> {
        self.attributes.remove(key)
    }

    /// Content item at `index`.
    #[must_use]
    pub fn content(&self, index: usize) -> Option<&Content> {
        self.contents.get(index)
    }

    /// Returns the element's `id` attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").and_then(AttrValue::text)
    }

    /// Returns the set of class names from the `class` attribute.
    ///
    /// The class attribute holds space-separated tokens.
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.attribute("class").and_then(AttrValue::text) {
            Some(classlist) => classlist.split_whitespace().collect(),
            None => HashSet::new(),
        }
    }

    /// Mark this element (and everything under it) to be written without
    /// inserted indentation or line breaks.
    pub const fn preserve_space(&mut self) -> &mut Self {
        self.preserve_space = true;
        self
    }

    /// Clear the preserve-space flag.
    pub const fn unpreserve_space(&mut self) -> &mut Self {
        self.preserve_space = false;
        self
    }

    /// Whether the preserve-space flag is set.
    #[must_use]
    pub const fn is_preserve_space(&self) -> bool {
        self.preserve_space
    }

    /// Append the name and the rendered attributes, e.g. `e a='1'`.
    pub fn write_name_and_attributes(&self, out: &mut String) {
        out.push_str(self.name.as_str());
        self.attributes.write_to(out);
    }

    /// Append the compact serialization: no whitespace is inserted.
    ///
    /// An element without content is written as `<name />`.
    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        self.write_name_and_attributes(out);
        if self.contents.is_empty() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for content in &self.contents {
            content.write_to(out);
        }
        out.push_str("</");
        out.push_str(self.name.as_str());
        out.push('>');
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && self.contents == other.contents
            && self.preserve_space == other.preserve_space
    }
}

impl Drop for Element {
    /// Tears the subtree down with a heap work list, so dropping a deeply
    /// nested tree does not recurse once per level.
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.contents);
        while let Some(content) = pending.pop() {
            if let Content::Element(mut element) = content {
                pending.append(&mut element.contents);
            }
        }
    }
}

impl Index<usize> for Element {
    type Output = Content;

    fn index(&self, index: usize) -> &Content {
        &self.contents[index]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}
