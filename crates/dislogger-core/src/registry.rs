//! Named instance cache.
//!
//! Formatters, handlers and loggers are built once per configured name and
//! shared for the rest of the process. The resolver keeps one
//! [`NamedRegistry`] per kind.

use std::sync::Arc;

use dashmap::DashMap;

use dislogger_logging::{Formatter, Handler, Logger};

/// Items that can be stored in a [`NamedRegistry`].
pub trait Registerable: Send + Sync {
    /// The configured name of this item.
    fn registry_id(&self) -> &str;
}

impl Registerable for Formatter {
    fn registry_id(&self) -> &str {
        self.name()
    }
}

impl Registerable for dyn Handler {
    fn registry_id(&self) -> &str {
        self.name()
    }
}

impl Registerable for Logger {
    fn registry_id(&self) -> &str {
        self.name()
    }
}

/// Thread-safe map from configured name to shared instance.
pub struct NamedRegistry<T: ?Sized + Registerable> {
    items: DashMap<String, Arc<T>>,
}

impl<T: ?Sized + Registerable> NamedRegistry<T> {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Store `item` unless an item with the same name is already cached.
    ///
    /// Returns the cached instance, so concurrent builders of the same name
    /// all end up sharing the first one stored.
    pub fn insert(&self, item: Arc<T>) -> Arc<T> {
        let id = item.registry_id().to_string();
        self.items.entry(id).or_insert(item).value().clone()
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.items.get(id).map(|item| item.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Names of every cached item, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.items.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: ?Sized + Registerable> Default for NamedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use dislogger_logging::{Level, MemoryHandler};

    use super::*;

    #[test]
    fn test_insert_keeps_first_instance() {
        let registry: NamedRegistry<Formatter> = NamedRegistry::new();
        let first = registry.insert(Arc::new(Formatter::new("Main", "%(message)s")));
        let second = registry.insert(Arc::new(Formatter::new("Main", "%(levelname)s")));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.pattern(), "%(message)s");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_trait_object_registry() {
        let registry: NamedRegistry<dyn Handler> = NamedRegistry::default();
        assert!(registry.is_empty());

        let formatter = Arc::new(Formatter::new("Main", "%(message)s"));
        registry.insert(Arc::new(MemoryHandler::new("Memory", Level::Info, formatter)));

        assert!(registry.contains("Memory"));
        assert_eq!(registry.get("Memory").unwrap().name(), "Memory");
        assert!(registry.get("Console").is_none());
    }

    #[test]
    fn test_ids_sorted() {
        let registry: NamedRegistry<Logger> = NamedRegistry::new();
        registry.insert(Arc::new(Logger::new("main.test", Level::Info)));
        registry.insert(Arc::new(Logger::new("main", Level::Info)));

        assert_eq!(registry.ids(), vec!["main".to_string(), "main.test".to_string()]);
    }
}
