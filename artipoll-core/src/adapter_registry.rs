//! Registry mapping repository types to their adapters.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::adapter::RepositoryAdapter;
use crate::artifact::RepositoryType;

/// Registry of repository adapters, shared by query services.
pub struct AdapterRegistry {
    adapters: RwLock<HashMap<RepositoryType, Arc<dyn RepositoryAdapter>>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an adapter under the repository type it reports.
    ///
    /// A later registration for the same type replaces the earlier one.
    pub fn register<A>(&self, adapter: A)
    where
        A: RepositoryAdapter + 'static,
    {
        if let Ok(mut adapters) = self.adapters.write() {
            adapters.insert(adapter.repository_type(), Arc::new(adapter));
        }
    }

    /// Gets the adapter for a repository type.
    ///
    /// Returns `None` if no adapter is registered for the type.
    pub fn get(&self, repo_type: RepositoryType) -> Option<Arc<dyn RepositoryAdapter>> {
        self.adapters
            .read()
            .ok()
            .and_then(|adapters| adapters.get(&repo_type).cloned())
    }

    /// Lists all registered repository types.
    pub fn registered_types(&self) -> Vec<RepositoryType> {
        self.adapters
            .read()
            .ok()
            .map(|adapters| adapters.keys().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
