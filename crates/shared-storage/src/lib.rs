//! # Shared Storage
//!
//! The ordered key-value namespace embedded contracts persist into.
//!
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Semantics
//!
//! | Concern | Behaviour |
//! |---------|-----------|
//! | Delete | Writes an empty tombstone; readers treat empty as absent |
//! | Iteration | `prefix_scan` returns keys in ascending byte order |
//! | Atomicity | `atomic_batch_write` applies all operations or none |
//! | Isolation | `NamespacedStore` prefixes every key with a contract namespace |
//! | Rollback | `OverlayStore` buffers a transition's writes until commit |
//!
//! ## Module Structure
//!
//! ```text
//! shared-storage/
//! ├── domain/          # StorageError
//! ├── ports/           # KeyValueReader, KeyValueStore, BatchOperation
//! └── adapters/        # InMemoryKVStore, OverlayStore, NamespacedStore
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryKVStore, NamespacedStore, OverlayStore};
pub use domain::StorageError;
pub use ports::{BatchOperation, KeyValueReader, KeyValueStore, ScanResult};
