use indexmap::IndexMap;
use trellis_dom::{Attributes, Element, Name};

/// Creates an element from its attributes.
pub type Factory = fn(Attributes) -> Element;

/// Table of named element factories used by [`Builder::build`](crate::Builder::build).
///
/// The generic [`Builder::element`](crate::Builder::element) entry point is
/// always available and does not go through the registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    factories: IndexMap<Name, Factory>,
}

impl Registry {
    /// The core registry. It registers nothing.
    #[must_use]
    pub fn core() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<Name>, factory: Factory) -> Self {
        let _ = self.register(name, factory);
        self
    }

    /// Register `factory` under `name`. Returns the factory it replaces.
    pub fn register(&mut self, name: impl Into<Name>, factory: Factory) -> Option<Factory> {
        self.factories.insert(name.into(), factory)
    }

    /// Look up the factory for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Factory> {
        self.factories.get(name).copied()
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.factories.keys()
    }

    /// Merge all factories of `other` into this registry.
    pub fn extend(&mut self, other: &Self) {
        self.factories
            .extend(other.factories.iter().map(|(name, factory)| (name.clone(), *factory)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(attributes: Attributes) -> Element {
        Element::with_attributes("call", attributes)
    }

    #[test]
    fn test_core_is_empty() {
        assert_eq!(Registry::core().names().count(), 0);
        assert!(!Registry::core().contains("element"));
    }

    #[test]
    fn test_register_and_get() {
        let registry = Registry::core().with("call", call);
        assert!(registry.contains("call"));
        let factory = registry.get("call").unwrap();
        assert_eq!(factory(Attributes::new()), Element::new("call"));
        assert!(registry.get("dummy").is_none());
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut registry = Registry::core().with("a", call);
        registry.extend(&Registry::core().with("b", call).with("c", call));
        let names: Vec<&str> = registry.names().map(Name::as_str).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
