//! Indented serialization for Trellis element trees.
//!
//! [`Formatter`] pretty-prints a tree with one node per line and a
//! configurable indent unit. Elements selected by a [`Preserver`] (or flagged
//! with [`Element::preserve_space`](trellis_dom::Element::preserve_space))
//! are written compactly, with no whitespace injected into their subtree.
//!
//! ```
//! use trellis_dom::Element;
//! use trellis_format::{FormatOptions, Formatter};
//!
//! let e = Element::new("e").child(Element::new("s"));
//! assert_eq!(Formatter::write(&e, FormatOptions::default()), "<e>\n  <s />\n</e>\n");
//! ```

/// The indenting writer.
pub mod formatter;
/// Options and preserve selectors.
pub mod options;

pub use formatter::Formatter;
pub use options::{FormatOptions, Preserver};
