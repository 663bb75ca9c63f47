//! # Overlay Store
//!
//! Buffers the writes of one state transition on top of a read-only base.
//! The buffered writes become a single [`BatchOperation`] list which the
//! caller commits with `atomic_batch_write` once the transition succeeds,
//! or drops to discard every write of a failed one.

use crate::domain::StorageError;
use crate::ports::outbound::{BatchOperation, KeyValueReader, KeyValueStore, ScanResult};
use std::collections::BTreeMap;
use tracing::trace;

/// Copy-on-write view over a base store.
pub struct OverlayStore<'a> {
    base: &'a dyn KeyValueReader,
    /// Pending writes in key order. An empty value is a pending delete.
    writes: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl<'a> OverlayStore<'a> {
    /// Create an overlay with no pending writes.
    pub fn new(base: &'a dyn KeyValueReader) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    /// Number of keys written so far.
    pub fn pending(&self) -> usize {
        self.writes.len()
    }

    /// Consume the overlay, yielding its writes in key order.
    pub fn into_operations(self) -> Vec<BatchOperation> {
        self.writes
            .into_iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    BatchOperation::Delete { key }
                } else {
                    BatchOperation::Put { key, value }
                }
            })
            .collect()
    }
}

impl KeyValueReader for OverlayStore<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        match self.writes.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.base.get(key),
        }
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StorageError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = self.base.prefix_scan(prefix)?.into_iter().collect();
        for (key, value) in self
            .writes
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
        {
            merged.insert(key.clone(), value.clone());
        }
        Ok(merged.into_iter().collect())
    }
}

impl KeyValueStore for OverlayStore<'_> {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        trace!(key_len = key.len(), value_len = value.len(), "overlay put");
        self.writes.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StorageError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.writes.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.writes.insert(key, Vec::new());
                }
            }
        }
        Ok(())
    }
}
