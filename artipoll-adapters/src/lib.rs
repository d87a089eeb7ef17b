//! Repository adapters for Maven, Helm and generic file layouts.

pub mod generic;
pub mod helm;
pub mod maven;

pub use generic::GenericAdapter;
pub use helm::HelmAdapter;
pub use maven::MavenAdapter;

use artipoll_core::AdapterRegistry;

/// Registry holding the adapter for every supported repository type.
pub fn default_registry() -> AdapterRegistry {
    let registry = AdapterRegistry::new();
    registry.register(MavenAdapter);
    registry.register(HelmAdapter);
    registry.register(GenericAdapter);
    registry
}
