//! Adapters implementing the key-value ports.

pub mod memory;
pub mod namespaced;
pub mod overlay;

pub use memory::InMemoryKVStore;
pub use namespaced::NamespacedStore;
pub use overlay::OverlayStore;
