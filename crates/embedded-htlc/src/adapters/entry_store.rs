//! # Entry Store
//!
//! Persists HTLC entries and their two secondary indices in the contract
//! namespace.
//!
//! ## Key Layout
//!
//! | Record | Key | Value |
//! |--------|-----|-------|
//! | Entry | `0x01 ∥ id` | `htlcInfo` variable |
//! | Time-lock ref | `0x02 ∥ timeLocked ∥ id` | `0x01` |
//! | Hash-lock ref | `0x03 ∥ hashLocked ∥ id` | `0x01` |
//! | Proxy unlock preference | `0x04 ∥ address` | `0x01` allowed, `0x00` denied |
//!
//! Deletes are empty tombstones; every read goes through
//! `get_present`, so callers only see found or not found.

use crate::abi::{AbiValue, HTLC_INFO_VARIABLE};
use crate::domain::{HashType, HtlcEntry, HtlcError, HtlcRef, LockType};
use shared_storage::{BatchOperation, KeyValueReader, KeyValueStore};
use shared_types::{Address, Hash};
use tracing::warn;

/// Key prefix of entries.
pub const ENTRY_PREFIX: u8 = 1;
/// Key prefix of proxy unlock preferences.
pub const PROXY_UNLOCK_PREFIX: u8 = 4;

const REF_VALUE: [u8; 1] = [1];
const PROXY_ALLOWED: u8 = 1;
const PROXY_DENIED: u8 = 0;

const REF_KEY_LEN: usize = 1 + Address::LEN + Hash::LEN;

/// Storage key of an entry.
pub fn entry_key(id: &Hash) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + Hash::LEN);
    key.push(ENTRY_PREFIX);
    key.extend_from_slice(id.as_bytes());
    key
}

fn ref_prefix(lock_type: LockType, address: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(REF_KEY_LEN);
    key.push(lock_type.prefix());
    key.extend_from_slice(address.as_bytes());
    key
}

/// Storage key of an index reference.
pub fn ref_key(lock_type: LockType, address: &Address, id: &Hash) -> Vec<u8> {
    let mut key = ref_prefix(lock_type, address);
    key.extend_from_slice(id.as_bytes());
    key
}

fn proxy_unlock_key(address: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + Address::LEN);
    key.push(PROXY_UNLOCK_PREFIX);
    key.extend_from_slice(address.as_bytes());
    key
}

fn parse_ref_key(lock_type: LockType, key: &[u8]) -> Result<HtlcRef, HtlcError> {
    if key.len() != REF_KEY_LEN || key[0] != lock_type.prefix() {
        return Err(HtlcError::corrupted(format!(
            "ref key of length {} under prefix {}",
            key.len(),
            lock_type.prefix()
        )));
    }
    let address = Address::from_slice(&key[1..1 + Address::LEN])
        .ok_or_else(|| HtlcError::corrupted("ref key address"))?;
    let id = Hash::from_slice(&key[1 + Address::LEN..]).ok_or_else(|| HtlcError::corrupted("ref key id"))?;
    Ok(HtlcRef {
        lock_type,
        address,
        id,
    })
}

fn encode_entry(entry: &HtlcEntry) -> Result<Vec<u8>, HtlcError> {
    HTLC_INFO_VARIABLE
        .encode(&[
            AbiValue::Address(entry.time_locked),
            AbiValue::Address(entry.hash_locked),
            AbiValue::TokenStandard(entry.token_standard),
            AbiValue::Uint256(entry.amount),
            AbiValue::Int64(entry.expiration_time),
            AbiValue::Uint8(entry.hash_type.tag()),
            AbiValue::Uint8(entry.key_max_size),
            AbiValue::Bytes(entry.hash_lock.clone()),
        ])
        .map_err(HtlcError::internal)
}

fn decode_entry(id: Hash, value: &[u8]) -> Result<HtlcEntry, HtlcError> {
    let values = HTLC_INFO_VARIABLE.decode(value).map_err(HtlcError::corrupted)?;
    match <[AbiValue; 8]>::try_from(values) {
        Ok(
            [AbiValue::Address(time_locked), AbiValue::Address(hash_locked), AbiValue::TokenStandard(token_standard), AbiValue::Uint256(amount), AbiValue::Int64(expiration_time), AbiValue::Uint8(hash_type), AbiValue::Uint8(key_max_size), AbiValue::Bytes(hash_lock)],
        ) => Ok(HtlcEntry {
            id,
            time_locked,
            hash_locked,
            token_standard,
            amount,
            expiration_time,
            hash_type: HashType::try_from(hash_type).map_err(HtlcError::corrupted)?,
            key_max_size,
            hash_lock,
        }),
        _ => Err(HtlcError::corrupted(format!("entry {id} has unexpected field layout"))),
    }
}

/// HTLC entries and indices over a key-value namespace.
pub struct EntryStore<S> {
    store: S,
}

impl<S> EntryStore<S> {
    /// Entry store over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueReader> EntryStore<S> {
    /// Live entry with this id.
    pub fn get(&self, id: &Hash) -> Result<Option<HtlcEntry>, HtlcError> {
        self.store
            .get_present(&entry_key(id))?
            .map(|value| decode_entry(*id, &value))
            .transpose()
    }

    /// Live index references under `(lock_type, address)`, in id order.
    pub fn list_refs(&self, lock_type: LockType, address: &Address) -> Result<Vec<HtlcRef>, HtlcError> {
        self.store
            .prefix_scan(&ref_prefix(lock_type, address))?
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, _)| parse_ref_key(lock_type, &key))
            .collect()
    }

    /// Entries referenced from `(lock_type, address)`, unsorted.
    ///
    /// A reference whose entry is already gone is skipped; a reference
    /// pointing at an entry locked to a different address is corruption.
    pub fn list_entries(&self, lock_type: LockType, address: &Address) -> Result<Vec<HtlcEntry>, HtlcError> {
        let mut entries = Vec::new();
        for htlc_ref in self.list_refs(lock_type, address)? {
            let Some(entry) = self.get(&htlc_ref.id)? else {
                warn!(id = %htlc_ref.id, address = %address, ?lock_type, "skipping ref without entry");
                continue;
            };
            if entry.locked_address(lock_type) != *address {
                return Err(HtlcError::corrupted(format!(
                    "ref {lock_type:?}/{address} points at entry {} locked to {}",
                    entry.id,
                    entry.locked_address(lock_type)
                )));
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Proxy unlock preference of `address`. Never set means allowed.
    pub fn proxy_unlock_allowed(&self, address: &Address) -> Result<bool, HtlcError> {
        match self.store.get_present(&proxy_unlock_key(address))?.as_deref() {
            None => Ok(true),
            Some([PROXY_ALLOWED]) => Ok(true),
            Some([PROXY_DENIED]) => Ok(false),
            Some(other) => Err(HtlcError::corrupted(format!(
                "proxy unlock preference of {address} is 0x{}",
                hex::encode(other)
            ))),
        }
    }
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Write the entry record alone.
    pub fn put(&mut self, entry: &HtlcEntry) -> Result<(), HtlcError> {
        let value = encode_entry(entry)?;
        self.store.put(&entry_key(&entry.id), &value)?;
        Ok(())
    }

    /// Tombstone the entry record alone.
    pub fn delete(&mut self, id: &Hash) -> Result<(), HtlcError> {
        self.store.delete(&entry_key(id))?;
        Ok(())
    }

    /// Write one index reference.
    pub fn put_ref(&mut self, lock_type: LockType, address: &Address, id: &Hash) -> Result<(), HtlcError> {
        self.store.put(&ref_key(lock_type, address, id), &REF_VALUE)?;
        Ok(())
    }

    /// Tombstone one index reference.
    pub fn delete_ref(&mut self, lock_type: LockType, address: &Address, id: &Hash) -> Result<(), HtlcError> {
        self.store.delete(&ref_key(lock_type, address, id))?;
        Ok(())
    }

    /// Write the entry and both of its references in one batch.
    pub fn insert(&mut self, entry: &HtlcEntry) -> Result<(), HtlcError> {
        let value = encode_entry(entry)?;
        self.store.atomic_batch_write(vec![
            BatchOperation::put(entry_key(&entry.id), value),
            BatchOperation::put(
                ref_key(LockType::TimeLocked, &entry.time_locked, &entry.id),
                REF_VALUE,
            ),
            BatchOperation::put(
                ref_key(LockType::HashLocked, &entry.hash_locked, &entry.id),
                REF_VALUE,
            ),
        ])?;
        Ok(())
    }

    /// Tombstone the entry and both of its references in one batch.
    pub fn remove(&mut self, entry: &HtlcEntry) -> Result<(), HtlcError> {
        self.store.atomic_batch_write(vec![
            BatchOperation::delete(entry_key(&entry.id)),
            BatchOperation::delete(ref_key(LockType::TimeLocked, &entry.time_locked, &entry.id)),
            BatchOperation::delete(ref_key(LockType::HashLocked, &entry.hash_locked, &entry.id)),
        ])?;
        Ok(())
    }

    /// Record the proxy unlock preference of `address`.
    pub fn set_proxy_unlock(&mut self, address: &Address, allowed: bool) -> Result<(), HtlcError> {
        let value = if allowed { PROXY_ALLOWED } else { PROXY_DENIED };
        self.store.put(&proxy_unlock_key(address), &[value])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_storage::InMemoryKVStore;
    use shared_types::{U256, ZNN_TOKEN_STANDARD};

    const ALICE: Address = Address([0xa1; 20]);
    const BOB: Address = Address([0xb0; 20]);

    fn entry(id: u8, time_locked: Address, hash_locked: Address) -> HtlcEntry {
        HtlcEntry {
            id: Hash([id; 32]),
            time_locked,
            hash_locked,
            token_standard: ZNN_TOKEN_STANDARD,
            amount: U256::from(10),
            expiration_time: 1_000 + i64::from(id),
            hash_type: HashType::Sha256,
            key_max_size: 32,
            hash_lock: vec![id; 32],
        }
    }

    #[test]
    fn test_key_layout() {
        let id = Hash([7u8; 32]);
        assert_eq!(entry_key(&id)[0], ENTRY_PREFIX);
        assert_eq!(entry_key(&id).len(), 33);

        let key = ref_key(LockType::HashLocked, &BOB, &id);
        assert_eq!(key.len(), REF_KEY_LEN);
        assert_eq!(key[0], 3);
        assert_eq!(&key[1..21], BOB.as_bytes());
        assert_eq!(&key[21..], id.as_bytes());
    }

    #[test]
    fn test_insert_get_remove() {
        let mut kv = InMemoryKVStore::new();
        let mut store = EntryStore::new(&mut kv);
        let e = entry(1, ALICE, BOB);

        store.insert(&e).unwrap();
        assert_eq!(store.get(&e.id).unwrap(), Some(e.clone()));
        assert_eq!(store.list_refs(LockType::TimeLocked, &ALICE).unwrap().len(), 1);
        assert_eq!(store.list_refs(LockType::HashLocked, &BOB).unwrap().len(), 1);
        assert!(store.list_refs(LockType::HashLocked, &ALICE).unwrap().is_empty());

        store.remove(&e).unwrap();
        assert_eq!(store.get(&e.id).unwrap(), None);
        assert!(store.list_refs(LockType::TimeLocked, &ALICE).unwrap().is_empty());
        assert!(store.list_refs(LockType::HashLocked, &BOB).unwrap().is_empty());
    }

    #[test]
    fn test_persisted_value_omits_id() {
        let mut kv = InMemoryKVStore::new();
        let e = entry(2, ALICE, BOB);
        EntryStore::new(&mut kv).put(&e).unwrap();

        let raw = kv.get(&entry_key(&e.id)).unwrap().unwrap();
        let fields = HTLC_INFO_VARIABLE.decode(&raw).unwrap();
        assert_eq!(fields[0], AbiValue::Address(ALICE));
        assert_eq!(fields[3], AbiValue::Uint256(U256::from(10)));
        assert_eq!(fields[5], AbiValue::Uint8(1));
    }

    #[test]
    fn test_primitive_ref_operations() {
        let mut kv = InMemoryKVStore::new();
        let mut store = EntryStore::new(&mut kv);
        let id = Hash([5u8; 32]);

        store.put_ref(LockType::TimeLocked, &ALICE, &id).unwrap();
        let refs = store.list_refs(LockType::TimeLocked, &ALICE).unwrap();
        assert_eq!(
            refs,
            vec![HtlcRef {
                lock_type: LockType::TimeLocked,
                address: ALICE,
                id
            }]
        );

        store.delete_ref(LockType::TimeLocked, &ALICE, &id).unwrap();
        assert!(store.list_refs(LockType::TimeLocked, &ALICE).unwrap().is_empty());
    }

    #[test]
    fn test_list_entries_skips_dangling_ref() {
        let mut kv = InMemoryKVStore::new();
        let mut store = EntryStore::new(&mut kv);
        let kept = entry(1, ALICE, BOB);
        let gone = entry(2, ALICE, BOB);
        store.insert(&kept).unwrap();
        store.insert(&gone).unwrap();
        store.delete(&gone.id).unwrap();

        let entries = store.list_entries(LockType::TimeLocked, &ALICE).unwrap();
        assert_eq!(entries, vec![kept]);
    }

    #[test]
    fn test_list_entries_rejects_mismatched_ref() {
        let mut kv = InMemoryKVStore::new();
        let mut store = EntryStore::new(&mut kv);
        let e = entry(1, ALICE, BOB);
        store.put(&e).unwrap();
        store.put_ref(LockType::HashLocked, &ALICE, &e.id).unwrap();

        let err = store.list_entries(LockType::HashLocked, &ALICE).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_corrupted_entry_is_fatal() {
        let mut kv = InMemoryKVStore::new();
        let id = Hash([4u8; 32]);
        kv.put(&entry_key(&id), &[1, 2, 3]).unwrap();

        let err = EntryStore::new(&kv).get(&id).unwrap_err();
        assert!(matches!(err, HtlcError::CorruptedEntry { .. }));
    }

    #[test]
    fn test_proxy_unlock_preference() {
        let mut kv = InMemoryKVStore::new();
        let mut store = EntryStore::new(&mut kv);

        assert!(store.proxy_unlock_allowed(&BOB).unwrap());
        store.set_proxy_unlock(&BOB, false).unwrap();
        assert!(!store.proxy_unlock_allowed(&BOB).unwrap());
        assert!(store.proxy_unlock_allowed(&ALICE).unwrap());
        store.set_proxy_unlock(&BOB, true).unwrap();
        assert!(store.proxy_unlock_allowed(&BOB).unwrap());
    }

    #[test]
    fn test_proxy_unlock_garbage_is_corruption() {
        let mut kv = InMemoryKVStore::new();
        kv.put(&proxy_unlock_key(&BOB), &[7, 7]).unwrap();
        assert!(EntryStore::new(&kv).proxy_unlock_allowed(&BOB).unwrap_err().is_fatal());
    }
}
