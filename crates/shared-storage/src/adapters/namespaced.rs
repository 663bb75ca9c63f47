//! # Namespaced Store
//!
//! Gives each embedded contract its own key space inside the shared ledger
//! store by prefixing every key with the contract's namespace bytes.
//! Keys returned from scans have the namespace stripped again, so the
//! contract never sees another contract's keys.

use crate::domain::StorageError;
use crate::ports::outbound::{BatchOperation, KeyValueReader, KeyValueStore, ScanResult};

/// Prefixing adapter over any reader or store.
///
/// `S` is usually a reference (`&InMemoryKVStore`, `&mut dyn KeyValueStore`)
/// so a namespace can be opened for a single read or a single transition.
pub struct NamespacedStore<S> {
    inner: S,
    namespace: Vec<u8>,
}

impl<S> NamespacedStore<S> {
    /// Open `namespace` inside `inner`.
    pub fn new(inner: S, namespace: impl Into<Vec<u8>>) -> Self {
        Self {
            inner,
            namespace: namespace.into(),
        }
    }

    /// Namespace bytes prepended to every key.
    pub fn namespace(&self) -> &[u8] {
        &self.namespace
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.namespace.len() + key.len());
        full.extend_from_slice(&self.namespace);
        full.extend_from_slice(key);
        full
    }
}

impl<S: KeyValueReader> KeyValueReader for NamespacedStore<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        self.inner.get(&self.full_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StorageError> {
        let strip = self.namespace.len();
        Ok(self
            .inner
            .prefix_scan(&self.full_key(prefix))?
            .into_iter()
            .map(|(key, value)| (key[strip..].to_vec(), value))
            .collect())
    }
}

impl<S: KeyValueStore> KeyValueStore for NamespacedStore<S> {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        let full = self.full_key(key);
        self.inner.put(&full, value)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StorageError> {
        let prefixed = operations
            .into_iter()
            .map(|op| match op {
                BatchOperation::Put { key, value } => BatchOperation::Put {
                    key: self.full_key(&key),
                    value,
                },
                BatchOperation::Delete { key } => BatchOperation::Delete {
                    key: self.full_key(&key),
                },
            })
            .collect();
        self.inner.atomic_batch_write(prefixed)
    }
}
