use std::ops::{Deref, DerefMut};
use std::sync::LazyLock;

use trellis_dom::{Attributes, Comment, Element, IntoContent, Name};

use crate::error::DslError;
use crate::registry::Registry;

static CORE: LazyLock<Registry> = LazyLock::new(Registry::core);

/// Builds element trees with a stack of open containers.
#[derive(Debug)]
pub struct Builder<'r> {
    registry: &'r Registry,
    open: Vec<Element>,
    roots: Vec<Element>,
}

/// Closes the innermost open element when dropped, including on unwind.
struct Scope<'b, 'r> {
    builder: &'b mut Builder<'r>,
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        self.builder.close();
    }
}

impl<'r> Deref for Scope<'_, 'r> {
    type Target = Builder<'r>;

    fn deref(&self) -> &Self::Target {
        &*self.builder
    }
}

impl DerefMut for Scope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.builder
    }
}

impl Builder<'static> {
    /// A builder over the core registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(&CORE)
    }
}

impl Default for Builder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Builder<'r> {
    /// A builder whose [`build`](Self::build) looks names up in `registry`.
    #[must_use]
    pub const fn with_registry(registry: &'r Registry) -> Self {
        Self {
            registry,
            open: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Open a generic element named `name` and run `body` with it as the
    /// current container.
    pub fn element<R>(
        &mut self,
        name: impl Into<Name>,
        attributes: impl Into<Attributes>,
        body: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.scoped(Element::with_attributes(name, attributes), body)
    }

    /// Open a generic element with no body.
    pub fn leaf(&mut self, name: impl Into<Name>, attributes: impl Into<Attributes>) {
        self.element(name, attributes, |_| ());
    }

    /// Open an element created by the factory registered as `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`DslError::Unregistered`] when `tag` has no factory. The
    /// container stack is left untouched.
    pub fn build<R>(
        &mut self,
        tag: &str,
        attributes: impl Into<Attributes>,
        body: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, DslError> {
        let factory = self
            .registry
            .get(tag)
            .ok_or_else(|| DslError::Unregistered(Name::from(tag)))?;
        Ok(self.scoped(factory(attributes.into()), body))
    }

    /// Open an already constructed element.
    pub fn open<R>(&mut self, element: Element, body: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(element, body)
    }

    /// Append `value` to the current container.
    ///
    /// # Errors
    ///
    /// Returns [`DslError::NoContainer`] outside any element body.
    pub fn add(&mut self, value: impl IntoContent) -> Result<&mut Self, DslError> {
        let container = self.open.last_mut().ok_or(DslError::NoContainer)?;
        let _ = container.add(value);
        Ok(self)
    }

    /// Append a comment to the current container.
    ///
    /// # Errors
    ///
    /// Returns [`DslError::Dom`] when `text` contains `--`, or
    /// [`DslError::NoContainer`] outside any element body.
    pub fn comment(&mut self, text: impl Into<String>) -> Result<&mut Self, DslError> {
        let comment = Comment::new(text)?;
        self.add(comment)
    }

    /// The current container, if any.
    #[must_use]
    pub fn container(&self) -> Option<&Element> {
        self.open.last()
    }

    /// Mutable access to the current container.
    pub fn container_mut(&mut self) -> Option<&mut Element> {
        self.open.last_mut()
    }

    /// Number of open containers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Consume the builder and return the finished top-level elements.
    #[must_use]
    pub fn finish(self) -> Vec<Element> {
        self.roots
    }

    fn scoped<R>(&mut self, element: Element, body: impl FnOnce(&mut Self) -> R) -> R {
        self.open.push(element);
        let mut scope = Scope { builder: self };
        body(&mut *scope)
    }

    fn close(&mut self) {
        let Some(element) = self.open.pop() else {
            return;
        };
        match self.open.last_mut() {
            Some(parent) => {
                let _ = parent.add(element);
            }
            None => self.roots.push(element),
        }
    }

    fn into_root(mut self) -> Element {
        let Some(root) = self.roots.pop() else {
            unreachable!("a closed scope always leaves a root");
        };
        root
    }
}

/// Build a single generic element with a fresh builder.
pub fn element(
    name: impl Into<Name>,
    attributes: impl Into<Attributes>,
    body: impl FnOnce(&mut Builder<'static>),
) -> Element {
    let mut builder = Builder::new();
    builder.element(name, attributes, body);
    builder.into_root()
}

/// Build a single element from `registry` with a fresh builder.
///
/// # Errors
///
/// Returns [`DslError::Unregistered`] when `tag` has no factory.
pub fn build<'r>(
    registry: &'r Registry,
    tag: &str,
    attributes: impl Into<Attributes>,
    body: impl FnOnce(&mut Builder<'r>),
) -> Result<Element, DslError> {
    let mut builder = Builder::with_registry(registry);
    builder.build(tag, attributes, body)?;
    Ok(builder.into_root())
}
