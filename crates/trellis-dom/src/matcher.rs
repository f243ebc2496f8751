//! Matching and query engine.
//!
//! A [`Pattern`] is either a type test ([`TypeTag`]) or a structural
//! [`Template`]. Templates check, in order and short-circuiting:
//!
//! 1. the element name (exact or regex),
//! 2. every attribute constraint of the template; attributes the template
//!    does not mention are unconstrained,
//! 3. every required class token,
//! 4. every content constraint: a nested template must match some
//!    descendant at any depth, a literal must equal one of the direct text
//!    items, a regex must match one of them.

use regex::Regex;

use crate::kind::{self, Kind};
use crate::{AttrValue, Content, Element, Name, Text};

/// Test on the runtime type of a node.
#[derive(Debug, Clone, Copy)]
pub enum TypeTag {
    /// An element whose kind is this kind or derives from it.
    Element(&'static Kind),
    /// A [`Text`](crate::Text) item.
    Text,
    /// A raw scalar item.
    Raw,
    /// A comment item.
    Comment,
}

impl TypeTag {
    /// Matches every element.
    #[must_use]
    pub fn any_element() -> Self {
        Self::Element(&kind::ELEMENT)
    }

    fn accepts_element(self, element: &Element) -> bool {
        match self {
            Self::Element(kind) => element.kind().is_a(kind),
            _ => false,
        }
    }

    fn accepts_content(self, content: &Content) -> bool {
        match (self, content) {
            (_, Content::Element(element)) => self.accepts_element(element),
            (Self::Text, Content::Text(_))
            | (Self::Raw, Content::Raw(_))
            | (Self::Comment, Content::Comment(_)) => true,
            _ => false,
        }
    }
}

/// Constraint on an element name.
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// The name must be equal.
    Exact(Name),
    /// The name must match the regex.
    Regex(Regex),
}

impl NamePattern {
    fn accepts(&self, name: &Name) -> bool {
        match self {
            Self::Exact(expected) => expected == name,
            Self::Regex(re) => re.is_match(name.as_str()),
        }
    }
}

impl From<&str> for NamePattern {
    fn from(name: &str) -> Self {
        Self::Exact(name.into())
    }
}

impl From<String> for NamePattern {
    fn from(name: String) -> Self {
        Self::Exact(name.into())
    }
}

impl From<Name> for NamePattern {
    fn from(name: Name) -> Self {
        Self::Exact(name)
    }
}

impl From<&Name> for NamePattern {
    fn from(name: &Name) -> Self {
        Self::Exact(name.clone())
    }
}

impl From<Regex> for NamePattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

/// Constraint on one attribute.
#[derive(Debug, Clone)]
pub enum AttrPattern {
    /// The attribute must be missing or null.
    Absent,
    /// The attribute must be present and semantically equal.
    Value(AttrValue),
    /// The attribute must be present and its text must match.
    Regex(Regex),
}

impl AttrPattern {
    fn accepts(&self, actual: Option<&AttrValue>) -> bool {
        match self {
            Self::Absent => !actual.is_some_and(AttrValue::is_set),
            Self::Value(expected) => actual.is_some_and(|value| value == expected),
            Self::Regex(re) => actual
                .and_then(AttrValue::text)
                .is_some_and(|text| re.is_match(text)),
        }
    }
}

impl From<AttrValue> for AttrPattern {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Null => Self::Absent,
            value => Self::Value(value),
        }
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrPattern {
    fn from(value: Option<T>) -> Self {
        AttrValue::from(value).into()
    }
}

macro_rules! attr_pattern_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrPattern {
                fn from(value: $ty) -> Self {
                    AttrValue::from(value).into()
                }
            }
        )*
    };
}

attr_pattern_from_value!(&str, String, Name, bool, Text, i32, i64, u32, u64, usize);

impl From<Regex> for AttrPattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

/// Constraint on an element's content.
#[derive(Debug, Clone)]
pub enum ContentPattern {
    /// Some descendant element must match.
    Element(Template),
    /// A direct text item must equal this string.
    Literal(String),
    /// A direct text item must match this regex.
    Regex(Regex),
}

impl ContentPattern {
    fn accepts(&self, element: &Element) -> bool {
        match self {
            Self::Element(template) => template.matches_descendant_of(element),
            Self::Literal(expected) => element
                .contents()
                .iter()
                .any(|c| c.character_data() == Some(expected.as_str())),
            Self::Regex(re) => element
                .contents()
                .iter()
                .filter_map(Content::character_data)
                .any(|text| re.is_match(text)),
        }
    }
}

impl From<Template> for ContentPattern {
    fn from(template: Template) -> Self {
        Self::Element(template)
    }
}

impl From<&str> for ContentPattern {
    fn from(literal: &str) -> Self {
        Self::Literal(literal.to_string())
    }
}

impl From<String> for ContentPattern {
    fn from(literal: String) -> Self {
        Self::Literal(literal)
    }
}

impl From<Regex> for ContentPattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

/// Structural pattern for elements.
///
/// ```
/// use regex::Regex;
/// use trellis_dom::{Element, Template};
///
/// let e = Element::new("tag").attr("attr", "value");
/// assert!(e.matches(Template::new("tag").attr("attr", Regex::new("alu").unwrap())));
/// assert!(!e.matches(Template::new("tag").attr("attr2", "value")));
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    name: NamePattern,
    attributes: Vec<(Name, AttrPattern)>,
    classes: Vec<String>,
    contents: Vec<ContentPattern>,
}

impl Template {
    /// A template constraining only the name.
    pub fn new(name: impl Into<NamePattern>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            classes: Vec::new(),
            contents: Vec::new(),
        }
    }

    /// Add an attribute constraint. A null value means "must be absent".
    #[must_use]
    pub fn attr(mut self, key: impl Into<Name>, pattern: impl Into<AttrPattern>) -> Self {
        self.attributes.push((key.into(), pattern.into()));
        self
    }

    /// Require the attribute to be missing or null.
    #[must_use]
    pub fn absent(self, key: impl Into<Name>) -> Self {
        self.attr(key, AttrPattern::Absent)
    }

    /// Require a token in the `class` attribute.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add a content constraint.
    #[must_use]
    pub fn child(mut self, pattern: impl Into<ContentPattern>) -> Self {
        self.contents.push(pattern.into());
        self
    }

    /// Whether `element` satisfies every constraint.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        self.name.accepts(element.name())
            && self
                .attributes
                .iter()
                .all(|(key, pattern)| pattern.accepts(element.attribute(key.as_str())))
            && (self.classes.is_empty() || {
                let classes = element.classes();
                self.classes.iter().all(|c| classes.contains(c.as_str()))
            })
            && self.contents.iter().all(|pattern| pattern.accepts(element))
    }

    fn matches_descendant_of(&self, element: &Element) -> bool {
        element
            .contents()
            .iter()
            .filter_map(Content::as_element)
            .any(|child| self.matches(child) || self.matches_descendant_of(child))
    }
}

impl From<&Element> for Template {
    fn from(element: &Element) -> Self {
        let mut template = Self::new(element.name());
        for (key, value) in element.attributes() {
            template.attributes.push((key.clone(), AttrPattern::from(value.clone())));
        }
        for content in element.contents() {
            match content {
                Content::Element(child) => template.contents.push(Self::from(child).into()),
                Content::Text(text) => template.contents.push(text.value().into()),
                Content::Raw(raw) => template.contents.push(raw.as_str().into()),
                Content::Comment(_) | Content::Deferred(_) => {}
            }
        }
        template
    }
}

/// A query pattern for [`Element::matches`], [`Element::has`] and
/// [`Element::find`].
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Runtime type test; ignores attributes and contents.
    Is(TypeTag),
    /// Structural test.
    Template(Template),
}

impl Pattern {
    /// Whether the pattern accepts this element.
    #[must_use]
    pub fn accepts_element(&self, element: &Element) -> bool {
        match self {
            Self::Is(tag) => tag.accepts_element(element),
            Self::Template(template) => template.matches(element),
        }
    }

    /// Whether the pattern accepts this content item. Only type tags accept
    /// non-element items.
    #[must_use]
    pub fn accepts_content(&self, content: &Content) -> bool {
        match (self, content) {
            (_, Content::Element(element)) => self.accepts_element(element),
            (Self::Is(tag), _) => tag.accepts_content(content),
            (Self::Template(_), _) => false,
        }
    }
}

impl From<TypeTag> for Pattern {
    fn from(tag: TypeTag) -> Self {
        Self::Is(tag)
    }
}

impl From<Template> for Pattern {
    fn from(template: Template) -> Self {
        Self::Template(template)
    }
}

impl From<&Element> for Pattern {
    fn from(element: &Element) -> Self {
        Self::Template(element.into())
    }
}

impl From<Element> for Pattern {
    fn from(element: Element) -> Self {
        Self::Template((&element).into())
    }
}

impl From<&str> for Pattern {
    fn from(name: &str) -> Self {
        Self::Template(Template::new(name))
    }
}

impl From<String> for Pattern {
    fn from(name: String) -> Self {
        Self::Template(Template::new(name))
    }
}

impl From<Name> for Pattern {
    fn from(name: Name) -> Self {
        Self::Template(Template::new(name))
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self::Template(Template::new(re))
    }
}

/// A node located by [`Element::find`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Found<'a> {
    /// A matching element.
    Element(&'a Element),
    /// A matching non-element content item.
    Content(&'a Content),
}

impl<'a> Found<'a> {
    /// The element, if one was found.
    #[must_use]
    pub const fn as_element(self) -> Option<&'a Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Content(_) => None,
        }
    }

    /// Character data of a found text or raw item.
    #[must_use]
    pub fn character_data(self) -> Option<&'a str> {
        match self {
            Self::Element(_) => None,
            Self::Content(content) => content.character_data(),
        }
    }
}

fn template_with<K, V>(name: impl Into<NamePattern>, attributes: impl IntoIterator<Item = (K, V)>) -> Pattern
where
    K: Into<Name>,
    V: Into<AttrPattern>,
{
    let template = attributes
        .into_iter()
        .fold(Template::new(name), |template, (key, value)| template.attr(key, value));
    Pattern::Template(template)
}

impl Element {
    /// Whether this element matches the pattern.
    pub fn matches(&self, pattern: impl Into<Pattern>) -> bool {
        self.matches_pattern(&pattern.into())
    }

    /// Two-argument form of [`matches`](Self::matches): name plus
    /// attribute constraints.
    pub fn matches_with<K, V>(&self, name: impl Into<NamePattern>, attributes: impl IntoIterator<Item = (K, V)>) -> bool
    where
        K: Into<Name>,
        V: Into<AttrPattern>,
    {
        self.matches_pattern(&template_with(name, attributes))
    }

    /// [`matches`](Self::matches) for an already-built pattern.
    #[must_use]
    pub fn matches_pattern(&self, pattern: &Pattern) -> bool {
        pattern.accepts_element(self)
    }

    /// Whether this element or any descendant matches the pattern.
    ///
    /// Type tags also accept non-element items of that type.
    pub fn has(&self, pattern: impl Into<Pattern>) -> bool {
        self.has_pattern(&pattern.into())
    }

    /// Two-argument form of [`has`](Self::has).
    pub fn has_with<K, V>(&self, name: impl Into<NamePattern>, attributes: impl IntoIterator<Item = (K, V)>) -> bool
    where
        K: Into<Name>,
        V: Into<AttrPattern>,
    {
        self.has_pattern(&template_with(name, attributes))
    }

    /// [`has`](Self::has) for an already-built pattern.
    #[must_use]
    pub fn has_pattern(&self, pattern: &Pattern) -> bool {
        if pattern.accepts_element(self) {
            return true;
        }
        self.contents().iter().any(|content| match content {
            Content::Element(child) => child.has_pattern(pattern),
            _ => pattern.accepts_content(content),
        })
    }

    /// Every matching node, self first, then descendants in document order.
    pub fn find(&self, pattern: impl Into<Pattern>) -> Vec<Found<'_>> {
        self.find_pattern(&pattern.into())
    }

    /// Two-argument form of [`find`](Self::find).
    pub fn find_with<K, V>(
        &self,
        name: impl Into<NamePattern>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Vec<Found<'_>>
    where
        K: Into<Name>,
        V: Into<AttrPattern>,
    {
        self.find_pattern(&template_with(name, attributes))
    }

    /// [`find`](Self::find) for an already-built pattern.
    #[must_use]
    pub fn find_pattern(&self, pattern: &Pattern) -> Vec<Found<'_>> {
        let mut found = Vec::new();
        self.collect_matches(pattern, &mut found);
        found
    }

    fn collect_matches<'a>(&'a self, pattern: &Pattern, found: &mut Vec<Found<'a>>) {
        if pattern.accepts_element(self) {
            found.push(Found::Element(self));
        }
        for content in self.contents() {
            match content {
                Content::Element(child) => child.collect_matches(pattern, found),
                _ if pattern.accepts_content(content) => found.push(Found::Content(content)),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Comment;

    static DUMMY: Kind = Kind::derive("dummy", &kind::ELEMENT);

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn test_match_by_name_and_attributes() {
        let e = Element::new("tag").attr("attr", "value");
        assert!(e.matches("tag"));
        assert!(e.matches_with("tag", [("attr", "value")]));
        assert!(!e.matches("t"));
        assert!(!e.matches_with("tag", [("attr2", "value")]));
        assert!(!e.matches_with("tag", [("attr", "value2")]));
        assert!(e.matches_with("tag", [("attr", re("val"))]));
    }

    #[test]
    fn test_match_against_element() {
        let e = Element::new("tag").attr("attr", "value");
        assert!(e.matches(&Element::new("tag")));
        assert!(e.matches(&Element::new("tag").attr("attr", "value")));
        assert!(!e.matches(&Element::new("t")));
        assert!(!e.matches(&Element::new("tag").attr("attr2", "value")));
        assert!(!e.matches(&Element::new("tag").attr("attr", "value2")));
    }

    #[test]
    fn test_match_attribute_regex_in_template() {
        let e = Element::new("tag").attr("attr", "value").attr("a2", "v2");
        assert!(e.matches(Template::new("tag").attr("attr", re("alu"))));
        assert!(!e.matches(Template::new("tag").attr("attr", re("aul"))));
        assert!(e.matches(Template::new("tag").attr("a2", "v2")));
    }

    #[test]
    fn test_match_name_regex() {
        let e = Element::new("tag");
        assert!(e.matches(re("ag")));
        assert!(!e.matches(re("elem")));
    }

    #[test]
    fn test_match_type_tags() {
        let e = Element::new("tag");
        assert!(e.matches(TypeTag::any_element()));
        assert!(!e.matches(TypeTag::Element(&DUMMY)));
        assert!(!e.matches(TypeTag::Raw));

        let dummy = Element::of_kind(&DUMMY, "tag", crate::Attributes::new());
        assert!(dummy.matches(TypeTag::Element(&DUMMY)));
        assert!(dummy.matches(TypeTag::any_element()));
    }

    #[test]
    fn test_match_content_constraints() {
        let e = Element::new("element").child(Element::new("sub")).child("text");
        assert!(e.matches(&Element::new("element").child(Element::new("sub"))));
        assert!(!e.matches(&Element::new("element").child(Element::new("other"))));
        assert!(e.matches(&Element::new("element").child("text")));
        assert!(!e.matches(&Element::new("element").child("other")));
        assert!(e.matches(Template::new("element").child(re("ex"))));
        assert!(!e.matches(Template::new("element").child(re("th"))));
        assert!(!e.matches(Template::new("element").child(re("sub"))));
    }

    #[test]
    fn test_content_element_constraint_searches_any_depth() {
        let e = Element::new("a").child(Element::new("b").child(Element::new("c")));
        assert!(e.matches(&Element::new("a").child(Element::new("c"))));
        assert!(!e.matches(&Element::new("a").child(Element::new("a"))));
    }

    #[test]
    fn test_absent_attribute_constraint() {
        let e = Element::new("e").attr("set", "x").attr("nil", AttrValue::Null);
        assert!(e.matches(Template::new("e").absent("missing")));
        assert!(e.matches(Template::new("e").absent("nil")));
        assert!(!e.matches(Template::new("e").absent("set")));
        assert!(e.matches_with("e", [("missing", None::<&str>)]));
    }

    #[test]
    fn test_encoded_and_plain_attribute_values_match() {
        let e = Element::new("e").attr("q", Text::from_encoded("a &amp; b"));
        assert!(e.matches_with("e", [("q", "a & b")]));

        let plain = Element::new("e").attr("q", "a & b");
        assert!(plain.matches(&Element::new("e").attr("q", Text::from_encoded("a &amp; b"))));
    }

    #[test]
    fn test_class_constraint() {
        let e = Element::new("div").attr("class", "note warning");
        assert!(e.matches(Template::new("div").class("warning")));
        assert!(e.matches(Template::new("div").class("note").class("warning")));
        assert!(!e.matches(Template::new("div").class("error")));
    }

    fn fixture() -> (Element, Element, Element, Element) {
        let deep = Element::new("deep").child("3rd");
        let s1 = Element::new("sub").child("2nd").child(deep.clone());
        let s2 = Element::new("sub").attr("attr", "value");
        let base = Element::new("base").child("1st").child(s1.clone()).child(s2.clone());
        (base, s1, deep, s2)
    }

    #[test]
    fn test_has() {
        let base = Element::new("base")
            .child(Element::new("sub").child(Element::new("deep").child("text")))
            .child(Element::new("sub").attr("attr", "value"));

        assert!(base.has("sub"));
        assert!(base.has_with("sub", [("attr", "value")]));
        assert!(!base.has_with("sub", [("attr", "value"), ("attr2", "")]));
        assert!(base.has("deep"));
        assert!(base.has("base"));
        assert!(!base.has("missing"));
        assert!(base.has(TypeTag::Raw));
        assert!(!base.has(TypeTag::Text));
        assert!(!base.has(TypeTag::Comment));
    }

    #[test]
    fn test_has_type_tag_on_text_and_comment() {
        let e = Element::new("e")
            .child(Element::new("inner").child(Text::new("t")))
            .child(Comment::new("c").unwrap());
        assert!(e.has(TypeTag::Text));
        assert!(e.has(TypeTag::Comment));
    }

    #[test]
    fn test_find() {
        let (base, s1, deep, s2) = fixture();

        let found = base.find("deep");
        assert_eq!(found, vec![Found::Element(&deep)]);

        let found = base.find("sub");
        assert_eq!(found, vec![Found::Element(&s1), Found::Element(&s2)]);

        let found = base.find(re(""));
        assert_eq!(
            found,
            vec![
                Found::Element(&base),
                Found::Element(&s1),
                Found::Element(&deep),
                Found::Element(&s2),
            ]
        );

        let found = base.find_with("sub", [("attr", "value")]);
        assert_eq!(found, vec![Found::Element(&s2)]);

        let texts: Vec<&str> = base
            .find(TypeTag::Raw)
            .into_iter()
            .filter_map(Found::character_data)
            .collect();
        assert_eq!(texts, vec!["1st", "2nd", "3rd"]);
    }

    #[test]
    fn test_find_returns_borrowed_nodes() {
        let (base, ..) = fixture();
        let found = base.find("deep");
        let deep = found[0].as_element().unwrap();
        assert_eq!(deep[0], "3rd");
    }
}
