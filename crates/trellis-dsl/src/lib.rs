//! Scoped builder for Trellis element trees.
//!
//! A [`Builder`] keeps a stack of open containers. Opening an element with a
//! body makes it the current container for the duration of the body; when
//! the body returns (or unwinds) the element is closed and appended to the
//! enclosing container, or becomes a finished root.
//!
//! ```
//! use trellis_dom::Attributes;
//!
//! let e = trellis_dsl::element("ul", Attributes::new(), |b| {
//!     b.element("li", [("class", "first")], |b| {
//!         let _ = b.add("one");
//!     });
//!     b.leaf("li", Attributes::new());
//! });
//! assert_eq!(e.to_string(), "<ul><li class='first'>one</li><li /></ul>");
//! ```
//!
//! Tag catalogs plug in through a [`Registry`] mapping names to element
//! factories; [`Builder::build`] looks a name up and fails with
//! [`DslError::Unregistered`] for unknown names.

/// The builder and its scope guard.
pub mod builder;
/// Builder errors.
pub mod error;
/// Name → factory table.
pub mod registry;

pub use builder::{Builder, build, element};
pub use error::DslError;
pub use registry::{Factory, Registry};
