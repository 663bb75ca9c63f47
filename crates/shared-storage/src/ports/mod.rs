//! Ports for the key-value namespace.

pub mod outbound;

pub use outbound::{BatchOperation, KeyValueReader, KeyValueStore, ScanResult};
