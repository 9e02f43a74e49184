//! Type-keyed service registry backing dependency resolution.
//!
//! Extensions resolve their collaborators from here by type instead of
//! receiving them positionally, so loaders stay a single `fn(&mut Client)`
//! regardless of what they need.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{HelpdeskError, Result};

/// Registry mapping a service type to its shared instance.
///
/// Providing a type twice replaces the earlier instance; lookups of a type
/// that was never provided fail with [`HelpdeskError::MissingDependency`].
#[derive(Default)]
pub struct ServiceRegistry {
    services: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared service instance under its type.
    pub fn provide<T: Any + Send + Sync>(&self, service: Arc<T>) {
        self.services.write().insert(TypeId::of::<T>(), service);
    }

    /// Resolve the service registered under `T`.
    pub fn get<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self
            .services
            .read()
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| HelpdeskError::missing_dependency(type_name::<T>()))?;

        entry
            .downcast::<T>()
            .map_err(|_| HelpdeskError::missing_dependency(type_name::<T>()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeter {
        greeting: String,
    }

    #[test]
    fn test_provide_and_get() {
        let registry = ServiceRegistry::new();
        registry.provide(Arc::new(Greeter {
            greeting: "hello".to_string(),
        }));

        let greeter = registry.get::<Greeter>().unwrap();
        assert_eq!(greeter.greeting, "hello");
    }

    #[test]
    fn test_missing_dependency() {
        let registry = ServiceRegistry::new();
        let result = registry.get::<Greeter>();

        match result {
            Err(HelpdeskError::MissingDependency { type_name }) => {
                assert!(type_name.contains("Greeter"));
            }
            _ => panic!("Expected MissingDependency error"),
        }
    }

    #[test]
    fn test_provide_replaces_existing() {
        let registry = ServiceRegistry::new();
        registry.provide(Arc::new(Greeter {
            greeting: "hello".to_string(),
        }));
        registry.provide(Arc::new(Greeter {
            greeting: "goodbye".to_string(),
        }));

        let greeter = registry.get::<Greeter>().unwrap();
        assert_eq!(greeter.greeting, "goodbye");
    }
}
