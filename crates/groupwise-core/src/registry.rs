//! Name-to-factory registry for pipeline plugins
//!
//! Registration happens once at startup from a static table; afterwards the
//! registry is only read. Names are unique per registry: a second registration
//! under the same name is rejected instead of overwriting the first.

use crate::error::{ConfigError, PluginKind};
use std::collections::HashMap;

/// Registry of factories for one plugin kind
///
/// `F` is the factory type, typically a plain `fn` pointer that constructs a
/// boxed trait object.
#[derive(Debug, Clone)]
pub struct Registry<F> {
    kind: PluginKind,
    entries: Vec<(String, F)>,
    index: HashMap<String, usize>,
}

impl<F> Registry<F> {
    /// Create an empty registry
    pub fn new(kind: PluginKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a registry from a declarative table
    pub fn from_table<I, S>(kind: PluginKind, table: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, F)>,
        S: Into<String>,
    {
        let mut registry = Self::new(kind);
        for (name, factory) in table {
            registry.register(name, factory)?;
        }
        Ok(registry)
    }

    /// The plugin kind this registry holds
    pub fn kind(&self) -> PluginKind {
        self.kind
    }

    /// Register a factory under `name`
    pub fn register(&mut self, name: impl Into<String>, factory: F) -> Result<(), ConfigError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ConfigError::DuplicateRegistration {
                kind: self.kind,
                name,
            });
        }
        tracing::trace!(kind = %self.kind, %name, "registered plugin");
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, factory));
        Ok(())
    }

    /// Resolve the factory registered under `name`
    pub fn resolve(&self, name: &str) -> Result<&F, ConfigError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i].1)
            .ok_or_else(|| ConfigError::UnknownPlugin {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    /// Check whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> u32 {
        1
    }

    fn two() -> u32 {
        2
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry: Registry<fn() -> u32> = Registry::new(PluginKind::Analysis);
        registry.register("One", one).unwrap();
        registry.register("Two", two).unwrap();

        assert_eq!((registry.resolve("Two").unwrap())(), 2);
        assert!(registry.contains("One"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["One", "Two"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry: Registry<fn() -> u32> = Registry::new(PluginKind::Plot);
        registry.register("Same", one).unwrap();
        let err = registry.register("Same", two).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::DuplicateRegistration { kind: PluginKind::Plot, ref name } if name == "Same"
        ));
        // The first registration survives
        assert_eq!((registry.resolve("Same").unwrap())(), 1);
    }

    #[test]
    fn test_unknown_plugin() {
        let registry: Registry<fn() -> u32> = Registry::new(PluginKind::Analysis);
        let err = registry.resolve("Missing").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownPlugin { kind: PluginKind::Analysis, ref name } if name == "Missing"
        ));
    }

    #[test]
    fn test_from_table() {
        let table: [(&str, fn() -> u32); 2] = [("One", one), ("Two", two)];
        let registry = Registry::from_table(PluginKind::Analysis, table).unwrap();
        assert_eq!(registry.len(), 2);

        let dup: [(&str, fn() -> u32); 2] = [("One", one), ("One", two)];
        assert!(Registry::from_table(PluginKind::Analysis, dup).is_err());
    }

    #[test]
    fn test_registries_are_independent() {
        let analyses = Registry::from_table(PluginKind::Analysis, [("Box", one as fn() -> u32)]).unwrap();
        let plots = Registry::from_table(PluginKind::Plot, [("Box", two as fn() -> u32)]).unwrap();
        assert_eq!((analyses.resolve("Box").unwrap())(), 1);
        assert_eq!((plots.resolve("Box").unwrap())(), 2);
    }
}
