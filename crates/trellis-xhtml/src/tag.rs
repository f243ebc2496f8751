use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use trellis_dom::{Attributes, Element, Kind, Name};
use trellis_dsl::Registry;

use crate::error::XhtmlError;

macro_rules! catalog {
    ($($tag:ident => $kind:ident),* $(,)?) => {
        /// Kinds of the catalog's elements.
        ///
        /// Every tag kind derives from [`BASE`]; the typed inputs derive from
        /// [`INPUT`].
        pub mod kinds {
            use trellis_dom::Kind;
            use trellis_dom::kind::ELEMENT;

            /// Parent of every XHTML kind.
            pub static BASE: Kind = Kind::derive("xhtml", &ELEMENT);

            $(
                #[doc = concat!("Kind of `", stringify!($kind), "` elements.")]
                pub static $kind: Kind = Kind::derive(stringify!($kind), &BASE);
            )*

            /// Kind of `<input type='hidden'>` elements.
            pub static HIDDEN: Kind = Kind::derive("HIDDEN", &INPUT);
            /// Kind of `<input type='submit'>` elements.
            pub static SUBMIT: Kind = Kind::derive("SUBMIT", &INPUT);
            /// Kind of `<input type='text'>` elements.
            pub static TEXT: Kind = Kind::derive("TEXT", &INPUT);
            /// Kind of `<input type='password'>` elements.
            pub static PASSWORD: Kind = Kind::derive("PASSWORD", &INPUT);
        }

        /// An XHTML tag known to the catalog.
        ///
        /// Converts to and from its lowercase element name with strum.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
        #[strum(serialize_all = "lowercase")]
        pub enum Tag {
            $(
                #[doc = concat!("The `", stringify!($kind), "` tag.")]
                $tag,
            )*
        }

        impl Tag {
            /// The kind given to elements of this tag.
            #[must_use]
            pub fn kind(self) -> &'static Kind {
                match self {
                    $(Self::$tag => &kinds::$kind,)*
                }
            }

            fn factory(self) -> fn(Attributes) -> Element {
                match self {
                    $(Self::$tag => |attributes| Self::$tag.create(attributes),)*
                }
            }
        }
    };
}

catalog! {
    Html => HTML,
    Head => HEAD,
    Meta => META,
    Link => LINK,
    Style => STYLE,
    Script => SCRIPT,
    Title => TITLE,
    Body => BODY,
    Pre => PRE,
    Form => FORM,
    H1 => H1,
    H2 => H2,
    H3 => H3,
    H4 => H4,
    H5 => H5,
    H6 => H6,
    P => P,
    A => A,
    Em => EM,
    Strong => STRONG,
    Div => DIV,
    Span => SPAN,
    Ul => UL,
    Ol => OL,
    Li => LI,
    Dl => DL,
    Dt => DT,
    Dd => DD,
    Table => TABLE,
    Caption => CAPTION,
    Tr => TR,
    Th => TH,
    Td => TD,
    Br => BR,
    Hr => HR,
    Textarea => TEXTAREA,
    Input => INPUT,
}

impl Tag {
    /// The element name, e.g. `"h1"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The tag named `name`, if the catalog has one.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Create an element of this tag.
    ///
    /// `pre` elements are created with preserved whitespace.
    pub fn create(self, attributes: impl Into<Attributes>) -> Element {
        let mut element = Element::of_kind(self.kind(), self.name(), attributes);
        if self == Self::Pre {
            let _ = element.preserve_space();
        }
        element
    }

    /// The heading tag for `level`.
    ///
    /// # Errors
    ///
    /// Returns [`XhtmlError::HeadingLevel`] unless `level` is in `1..=6`.
    pub const fn heading(level: u8) -> Result<Self, XhtmlError> {
        Ok(match level {
            1 => Self::H1,
            2 => Self::H2,
            3 => Self::H3,
            4 => Self::H4,
            5 => Self::H5,
            6 => Self::H6,
            _ => return Err(XhtmlError::HeadingLevel(level)),
        })
    }
}

/// Create an `h1`..`h6` element.
///
/// # Errors
///
/// Returns [`XhtmlError::HeadingLevel`] unless `level` is in `1..=6`.
pub fn heading(level: u8, attributes: impl Into<Attributes>) -> Result<Element, XhtmlError> {
    Ok(Tag::heading(level)?.create(attributes))
}

/// The `type` of a typed `input` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum InputType {
    /// `type='hidden'`
    Hidden,
    /// `type='submit'`
    Submit,
    /// `type='text'`
    Text,
    /// `type='password'`
    Password,
}

impl InputType {
    /// The kind given to inputs of this type.
    #[must_use]
    pub fn kind(self) -> &'static Kind {
        match self {
            Self::Hidden => &kinds::HIDDEN,
            Self::Submit => &kinds::SUBMIT,
            Self::Text => &kinds::TEXT,
            Self::Password => &kinds::PASSWORD,
        }
    }

    fn factory(self) -> fn(Attributes) -> Element {
        match self {
            Self::Hidden => |attributes| input(Self::Hidden, attributes),
            Self::Submit => |attributes| input(Self::Submit, attributes),
            Self::Text => |attributes| input(Self::Text, attributes),
            Self::Password => |attributes| input(Self::Password, attributes),
        }
    }
}

/// Create an `input` element of `input_type`. The `type` attribute always
/// reflects `input_type`, whatever `attributes` says.
pub fn input(input_type: InputType, attributes: impl Into<Attributes>) -> Element {
    let type_name: &'static str = input_type.into();
    Element::of_kind(input_type.kind(), "input", attributes).attr("type", Name::from(type_name))
}

/// `<input type='hidden' ... />`
pub fn hidden(attributes: impl Into<Attributes>) -> Element {
    input(InputType::Hidden, attributes)
}

/// `<input type='submit' ... />`
pub fn submit(attributes: impl Into<Attributes>) -> Element {
    input(InputType::Submit, attributes)
}

/// `<input type='text' ... />`
pub fn text(attributes: impl Into<Attributes>) -> Element {
    input(InputType::Text, attributes)
}

/// `<input type='password' ... />`
pub fn password(attributes: impl Into<Attributes>) -> Element {
    input(InputType::Password, attributes)
}

/// Register every tag and input helper under its lowercase name.
pub(crate) fn register_all(mut registry: Registry) -> Registry {
    for tag in Tag::iter() {
        let _ = registry.register(tag.name(), tag.factory());
    }
    for input_type in InputType::iter() {
        let name: &'static str = input_type.into();
        let _ = registry.register(name, input_type.factory());
    }
    registry
}
