//! Element tree for Trellis.
//!
//! This crate provides the in-memory document model shared by the parser,
//! the formatter and the builder DSL:
//! - [`Element`] - a named node with ordered [`Attributes`] and mixed [`Content`]
//! - [`Text`] - escaped character data, [`Comment`] - literal comment text
//! - [`Pattern`] / [`Template`] - the query language behind
//!   [`Element::matches`], [`Element::has`] and [`Element::find`]
//!
//! # Design
//!
//! Elements own their children directly: a child added to a parent is moved
//! into the parent's content list, and [`Clone`] is a deep copy. A node can
//! therefore never be linked under two parents at once.
//!
//! Compact serialization (no inserted whitespace) lives here as
//! [`Element::write_to`] and [`std::fmt::Display`]; indented output is the
//! job of the `trellis-format` crate.

/// Attribute values and the ordered attribute map.
pub mod attribute;
/// Comment nodes.
pub mod comment;
/// Content items held in an element's child list.
pub mod content;
/// The element node.
pub mod element;
/// Error types.
pub mod error;
/// Type tags for elements.
pub mod kind;
/// Matching and query engine.
pub mod matcher;
/// Canonical names for elements and attribute keys.
pub mod name;
/// Escaped character data.
pub mod text;

pub use attribute::{AttrValue, Attributes};
pub use comment::Comment;
pub use content::{Content, ContentProvider, IntoContent, ProviderOptions};
pub use element::Element;
pub use error::DomError;
pub use kind::Kind;
pub use matcher::{AttrPattern, ContentPattern, Found, NamePattern, Pattern, Template, TypeTag};
pub use name::Name;
pub use text::Text;

/// The XML declaration commonly written before a document element.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0"?>"#;

/// Assert that an element (or one of its descendants) matches a pattern.
///
/// Accepts anything convertible into a [`Pattern`].
///
/// ```
/// use trellis_dom::{Element, assert_has};
///
/// let mut body = Element::new("body");
/// let _ = body.add(Element::new("p").child("hello"));
/// assert_has!(body, "p");
/// ```
#[macro_export]
macro_rules! assert_has {
    ($element:expr, $pattern:expr $(,)?) => {{
        let element = &$element;
        let pattern = $crate::Pattern::from($pattern);
        assert!(
            element.has_pattern(&pattern),
            "<{}> doesn't have\n<{:?}>",
            element,
            pattern
        );
    }};
}
