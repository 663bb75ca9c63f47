//! Domain layer for the key-value namespace.

pub mod errors;

pub use errors::StorageError;
