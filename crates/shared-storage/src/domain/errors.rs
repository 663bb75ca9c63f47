//! # Domain Errors
//!
//! Error types for the key-value namespace.

use thiserror::Error;

/// Errors raised by a key-value store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    Io {
        /// Backend message.
        message: String,
    },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    Corruption {
        /// Backend message.
        message: String,
    },
}
