use std::fmt;
use std::ptr;

/// Type tag attached to every [`Element`](crate::Element).
///
/// Kinds form a single-inheritance chain rooted at [`ELEMENT`]. Catalogs of
/// specialised elements (the XHTML tags, for instance) declare their own
/// kinds as `static`s derived from a parent kind, and patterns or formatter
/// preservers can then select "this kind or anything derived from it".
///
/// Kinds are compared by identity, so they must live in `static`s.
pub struct Kind {
    name: &'static str,
    parent: Option<&'static Kind>,
    renamable: bool,
}

/// The root kind carried by plain elements.
pub static ELEMENT: Kind = Kind::root("element");

impl Kind {
    /// A kind with no parent.
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            renamable: false,
        }
    }

    /// A kind derived from `parent`.
    #[must_use]
    pub const fn derive(name: &'static str, parent: &'static Self) -> Self {
        Self {
            name,
            parent: Some(parent),
            renamable: parent.renamable,
        }
    }

    /// Allow [`Element::rename`](crate::Element::rename) on elements of this
    /// kind and of kinds derived from it afterwards.
    #[must_use]
    pub const fn renamable(mut self) -> Self {
        self.renamable = true;
        self
    }

    /// Human-readable kind name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The kind this one derives from.
    #[must_use]
    pub const fn parent(&self) -> Option<&'static Self> {
        self.parent
    }

    /// Whether elements of this kind may be renamed.
    #[must_use]
    pub const fn is_renamable(&self) -> bool {
        self.renamable
    }

    /// Whether this kind is `other` or derives from it.
    #[must_use]
    pub fn is_a(&self, other: &Self) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if ptr::eq(kind, other) {
                return true;
            }
            current = kind.parent;
        }
        false
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.name)
    }
}
