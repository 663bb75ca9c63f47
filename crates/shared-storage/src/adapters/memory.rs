use crate::domain::StorageError;
use crate::ports::outbound::{BatchOperation, KeyValueReader, KeyValueStore, ScanResult};
use std::collections::BTreeMap;

/// In-memory ordered key-value store.
///
/// Backs unit and integration tests. Keys are kept in a `BTreeMap` so
/// prefix scans come back in ascending key order, matching the ledger
/// store's iterator. Deletes leave empty tombstones behind.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held, tombstones included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueReader for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.get(key).cloned())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StorageError> {
        let results: Vec<_> = self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(results)
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StorageError> {
        // Single-threaded map: applying in order is already all-or-nothing
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.insert(key, Vec::new());
                }
            }
        }
        Ok(())
    }
}
