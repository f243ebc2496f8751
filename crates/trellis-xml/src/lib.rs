//! Markup parser for Trellis.
//!
//! # Scope
//!
//! This crate implements a permissive, whole-input parser that rebuilds a
//! `trellis-dom` tree from XML/XHTML text:
//! - **Tag recognition** - regex-driven, anchored at a cursor: comment, empty
//!   tag, end tag, start tag, then text run
//! - **Tree building** - an explicit stack of open elements, so nesting depth
//!   is bounded by memory rather than by the call stack
//! - **Entities** - text runs decode `&amp; &quot; &apos; &lt; &gt;`;
//!   attribute values are kept exactly as written
//!
//! Whitespace is never trimmed. A leading `<?...?>` declaration (and a
//! `<!DOCTYPE ...>` after it) is skipped.
//!
//! # Not Implemented
//!
//! - DTD processing, external entities, numeric character references
//! - Namespace resolution (prefixes stay part of the name)
//! - CDATA sections and processing instructions after the prolog

/// Text-run entity decoding.
pub mod entities;
/// Parse errors.
pub mod error;
/// The parser.
pub mod parser;

pub use error::ParseError;
pub use parser::{Parser, parse_element, parse_str};
