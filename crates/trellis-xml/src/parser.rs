//! Recursive-descent markup parser.
//!
//! The parser keeps a byte cursor into its input. Each call to
//! [`Parser::parse`] consumes exactly one top-level node, so a document with
//! leading or trailing text yields several results.
//!
//! Recognition order at the cursor: comment, empty tag, end tag, start tag,
//! text run. Nested nodes are collected with an explicit stack of open
//! elements; a start tag pushes, the matching end tag pops and appends the
//! finished element to its parent.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use trellis_common::warning::warn_once;
use trellis_dom::{AttrValue, Attributes, Comment, Content, Element, Name, Text};

use crate::entities::decode_text;
use crate::error::ParseError;

/// `<?xml ...?>` optionally followed by whitespace and a DOCTYPE.
static PROLOG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A(?:<\?.*?\?>)?(?:\s*<!DOCTYPE[^>]*>)?").expect("prolog regex")
});
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A<!--(.*?)-->").expect("comment regex"));
static EMPTY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A<([^>]*?)/>").expect("empty tag regex"));
static END_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A</([^\s>]+)\s*>").expect("end tag regex"));
static START_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A<([^>]*?[^/>]\s*)>").expect("start tag regex"));
static TEXT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[^<]+").expect("text regex"));
static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[^\s/>]+").expect("tag name regex"));
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\s+([^=\s]+)\s*=\s*(?:'(.*?)'|"(.*?)")"#).expect("attribute regex")
});

/// Which tag form opened an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagShape {
    Empty,
    Start,
}

/// One recognised token at the cursor.
enum Token {
    Comment(Comment),
    Open(Element, TagShape),
    Close(String),
    Text(Text),
}

/// A permissive, whole-input markup parser.
///
/// ```
/// use trellis_xml::Parser;
///
/// let mut parser = Parser::new("<e a='v'>text</e>");
/// let node = parser.parse().unwrap().unwrap();
/// assert_eq!(node.to_string(), "<e a='v'>text</e>");
/// assert!(parser.parse().unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    input: String,
    position: usize,
    started: bool,
}

impl Parser {
    /// Create a parser over `input`. The cursor starts at the beginning.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            position: 0,
            started: false,
        }
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether the cursor has reached the end of input.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consume and return the next top-level node.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Syntax`] when nothing can be recognised at the
    /// cursor (including end of input inside an open element),
    /// [`ParseError::EndTagMismatch`] when an end tag does not close the
    /// innermost open element, and [`ParseError::InvalidComment`] for a
    /// comment containing `--`.
    pub fn parse(&mut self) -> Result<Option<Content>, ParseError> {
        if !self.started {
            self.started = true;
            self.skip_prolog();
        }
        if self.is_at_end() {
            return Ok(None);
        }

        let mut open: Vec<Element> = Vec::new();
        loop {
            let offset = self.position;
            let finished = match self.next_token()? {
                Token::Comment(comment) => Content::Comment(comment),
                Token::Text(text) => Content::Text(text),
                Token::Open(element, TagShape::Empty) => Content::Element(element),
                Token::Open(element, TagShape::Start) => {
                    open.push(element);
                    continue;
                }
                Token::Close(found) => {
                    let Some(element) = open.pop() else {
                        return Err(ParseError::Syntax { offset });
                    };
                    if element.name().as_str() != found {
                        return Err(ParseError::EndTagMismatch {
                            expected: element.name().clone(),
                            found,
                            offset,
                        });
                    }
                    Content::Element(element)
                }
            };

            match open.last_mut() {
                Some(parent) => {
                    parent.contents_mut().push(finished);
                }
                None => return Ok(Some(finished)),
            }

            if self.is_at_end() {
                // Input ran out with elements still open.
                return Err(ParseError::Syntax {
                    offset: self.position,
                });
            }
        }
    }

    fn skip_prolog(&mut self) {
        if let Some(prolog) = PROLOG.find(&self.input)
            && !prolog.is_empty()
        {
            if prolog.as_str().contains("<!DOCTYPE") {
                warn_once("Parser", "DOCTYPE declaration skipped");
            }
            self.position = prolog.end();
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let offset = self.position;
        let rest = &self.input[offset..];

        if let Some(caps) = COMMENT.captures(rest) {
            let consumed = caps[0].len();
            let comment = comment_from_markup(&caps[1])
                .map_err(|_| ParseError::InvalidComment { offset })?;
            self.position += consumed;
            return Ok(Token::Comment(comment));
        }
        if let Some(caps) = EMPTY_TAG.captures(rest) {
            let consumed = caps[0].len();
            let element = element_from_tag(&caps[1], offset)?;
            self.position += consumed;
            return Ok(Token::Open(element, TagShape::Empty));
        }
        if let Some(caps) = END_TAG.captures(rest) {
            let consumed = caps[0].len();
            let name = caps[1].to_string();
            self.position += consumed;
            return Ok(Token::Close(name));
        }
        if let Some(caps) = START_TAG.captures(rest) {
            let consumed = caps[0].len();
            let element = element_from_tag(&caps[1], offset)?;
            self.position += consumed;
            return Ok(Token::Open(element, TagShape::Start));
        }
        if let Some(run) = TEXT_RUN.find(rest) {
            let text = Text::new(decode_text(run.as_str()));
            self.position += run.len();
            return Ok(Token::Text(text));
        }
        Err(ParseError::Syntax { offset })
    }
}

impl Iterator for Parser {
    type Item = Result<Content, ParseError>;

    /// Yields top-level nodes until end of input. After an error the
    /// iterator is exhausted.
    fn next(&mut self) -> Option<Self::Item> {
        match self.parse() {
            Ok(node) => node.map(Ok),
            Err(error) => {
                self.position = self.input.len();
                Some(Err(error))
            }
        }
    }
}

/// Strip the single space that [`Comment`] writes on either side.
fn comment_from_markup(body: &str) -> Result<Comment, trellis_dom::DomError> {
    let body = body.strip_prefix(' ').unwrap_or(body);
    let body = body.strip_suffix(' ').unwrap_or(body);
    Comment::new(body)
}

/// Build an element from the inside of a tag: a name followed by
/// `key='value'` or `key="value"` pairs.
fn element_from_tag(body: &str, offset: usize) -> Result<Element, ParseError> {
    let Some(name) = TAG_NAME.find(body) else {
        return Err(ParseError::Syntax { offset });
    };
    let mut attributes = Attributes::new();
    for caps in ATTRIBUTE.captures_iter(&body[name.end()..]) {
        let _ = attributes.insert(&caps[1], attribute_value(&caps));
    }
    Ok(Element::with_attributes(Name::from(name.as_str()), attributes))
}

/// Attribute values are kept as written. They are wrapped as already-encoded
/// text so that writing the tree back reproduces them byte for byte.
fn attribute_value(caps: &Captures<'_>) -> AttrValue {
    let raw = caps
        .get(2)
        .or_else(|| caps.get(3))
        .map_or("", |m| m.as_str());
    // Single quotes are written around every value.
    let raw = if raw.contains('\'') {
        raw.replace('\'', "&apos;")
    } else {
        raw.to_string()
    };
    AttrValue::Encoded(Text::from_encoded(raw))
}

/// Parse every top-level node of `input`.
///
/// # Errors
///
/// Returns the first error from [`Parser::parse`].
pub fn parse_str(input: &str) -> Result<Vec<Content>, ParseError> {
    Parser::new(input).collect()
}

/// Parse a document whose first node must be an element.
///
/// Whitespace-only text before the element is skipped.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] when the first non-whitespace node is
/// not an element, or any error from [`Parser::parse`].
pub fn parse_element(input: &str) -> Result<Element, ParseError> {
    let mut parser = Parser::new(input);
    loop {
        let offset = parser.position();
        match parser.parse()? {
            Some(Content::Element(element)) => return Ok(element),
            Some(Content::Text(text)) if text.value().trim().is_empty() => {}
            _ => return Err(ParseError::Syntax { offset }),
        }
    }
}
