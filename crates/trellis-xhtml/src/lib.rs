//! XHTML tag catalog for Trellis.
//!
//! Every XHTML tag in [`Tag`] creates elements carrying its own
//! [`Kind`](trellis_dom::Kind), all derived from [`kinds::BASE`], so queries
//! and formatter preservers can select "any XHTML element" or one tag
//! specifically.
//!
//! ```
//! use trellis_dom::Attributes;
//! use trellis_xhtml::{Tag, kinds};
//!
//! let p = Tag::P.create([("class", "note")]).child("hi");
//! assert_eq!(p.to_string(), "<p class='note'>hi</p>");
//! assert!(p.kind().is_a(&kinds::BASE));
//! assert!(Tag::Pre.create(Attributes::new()).is_preserve_space());
//! ```

/// The HTML document wrapper.
pub mod document;
/// Catalog errors.
pub mod error;
/// Tags, kinds and element constructors.
pub mod tag;

pub use document::HtmlDocument;
pub use error::XhtmlError;
pub use tag::{InputType, Tag, heading, hidden, input, kinds, password, submit, text};

use trellis_dsl::Registry;
use trellis_format::Preserver;

/// DOCTYPE for XHTML 1.1 plus MathML 2.0.
pub const DOCTYPE_XHTML_MATHML: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1 plus MathML 2.0//EN" "http://www.w3.org/TR/MathML2/dtd/xhtml-math11-f.dtd">"#;

/// The XHTML namespace URI.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A builder registry with a factory for every tag and input helper.
#[must_use]
pub fn registry() -> Registry {
    tag::register_all(Registry::core())
}

/// Elements whose whitespace is significant: `pre`, `script`, `style` and
/// `textarea`.
///
/// Selected by name, so parsed documents are covered as well as trees
/// built from the catalog.
#[must_use]
pub fn preservers() -> Vec<Preserver> {
    [Tag::Pre, Tag::Script, Tag::Style, Tag::Textarea]
        .into_iter()
        .map(|tag| Preserver::from(tag.name()))
        .collect()
}
