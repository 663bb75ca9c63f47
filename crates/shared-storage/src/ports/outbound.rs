//! # Outbound Ports (Driven Ports)
//!
//! The ordered key-value namespace every embedded contract persists into.
//!
//! ## Tombstones
//!
//! The ledger store has no true delete: deleting a key writes an empty
//! value. Readers must treat "present but empty" exactly like "absent".
//! [`KeyValueReader::get_present`] does that filtering once so callers
//! only see `Some(non_empty)` or `None`.

use crate::domain::StorageError;

/// Result of a prefix scan: `(key, value)` pairs in ascending key order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Read side of the key-value namespace.
///
/// Testing: `InMemoryKVStore`, `OverlayStore`, `NamespacedStore`
pub trait KeyValueReader: Send + Sync {
    /// Get the raw value stored under a key (may be an empty tombstone).
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Scan every key that starts with `prefix`, in ascending key order.
    ///
    /// Tombstoned keys are included with an empty value.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StorageError>;

    /// Get a value, mapping tombstones to `None`.
    fn get_present(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.get(key)?.filter(|value| !value.is_empty()))
    }

    /// Check if a key holds a non-empty value.
    fn exists(&self, key: &[u8]) -> Result<bool, StorageError> {
        Ok(self.get_present(key)?.is_some())
    }
}

/// Write side of the key-value namespace.
pub trait KeyValueStore: KeyValueReader {
    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Execute an atomic batch write.
    ///
    /// ## Atomicity Guarantee
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StorageError>;

    /// Delete a key by writing an empty tombstone.
    fn delete(&mut self, key: &[u8]) -> Result<(), StorageError> {
        self.put(key, &[])
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put {
        /// Key.
        key: Vec<u8>,
        /// Value.
        value: Vec<u8>,
    },
    /// Delete a key (tombstone).
    Delete {
        /// Key.
        key: Vec<u8>,
    },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }

    /// Key touched by this operation.
    pub fn key(&self) -> &[u8] {
        match self {
            BatchOperation::Put { key, .. } | BatchOperation::Delete { key } => key,
        }
    }
}

// =============================================================================
// REFERENCE FORWARDING
// =============================================================================

impl<T: KeyValueReader + ?Sized> KeyValueReader for &T {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StorageError> {
        (**self).prefix_scan(prefix)
    }
}

impl<T: KeyValueReader + ?Sized> KeyValueReader for &mut T {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StorageError> {
        (**self).prefix_scan(prefix)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StorageError> {
        (**self).atomic_batch_write(operations)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}
