//! # HTLC Query Service
//!
//! Read-only API over the committed ledger state. Every call takes the
//! read lock for its duration and never writes.

use crate::adapters::{contract_namespace, EntryStore};
use crate::algorithms::listing::paginate;
use crate::config::HtlcConfig;
use crate::domain::{EntryList, HtlcEntry, HtlcError, LockType};
use crate::ports::inbound::HtlcQueryApi;
use parking_lot::RwLock;
use shared_storage::{KeyValueReader, NamespacedStore};
use shared_types::{Address, Hash};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Query API over a shared ledger store.
pub struct HtlcApi<S> {
    ledger: Arc<RwLock<S>>,
    config: HtlcConfig,
}

impl<S: KeyValueReader> HtlcApi<S> {
    /// API over `ledger`.
    pub fn new(ledger: Arc<RwLock<S>>, config: HtlcConfig) -> Self {
        Self { ledger, config }
    }

    fn with_store<T>(
        &self,
        f: impl FnOnce(&EntryStore<NamespacedStore<&S>>) -> Result<T, HtlcError>,
    ) -> Result<T, HtlcError> {
        let guard = self.ledger.read();
        let namespace = NamespacedStore::new(&*guard, contract_namespace(&self.config.contract_address));
        f(&EntryStore::new(namespace))
    }

    fn list(
        &self,
        lock_type: LockType,
        address: Address,
        page_index: u32,
        page_size: u32,
    ) -> Result<EntryList, HtlcError> {
        if page_size > self.config.max_page_size {
            return Err(HtlcError::PageSizeTooBig {
                requested: page_size,
                max: self.config.max_page_size,
            });
        }
        let entries = self.with_store(|store| store.list_entries(lock_type, &address))?;
        let page = paginate(entries, page_index, page_size);
        debug!(count = page.count, returned = page.list.len(), "listed entries");
        Ok(page)
    }
}

impl<S: KeyValueReader> HtlcQueryApi for HtlcApi<S> {
    #[instrument(skip(self))]
    fn get_entry_by_id(&self, id: Hash) -> Result<HtlcEntry, HtlcError> {
        self.with_store(|store| store.get(&id))?
            .ok_or(HtlcError::EntryNotFound(id))
    }

    #[instrument(skip(self))]
    fn get_entries_by_time_locked_address(
        &self,
        address: Address,
        page_index: u32,
        page_size: u32,
    ) -> Result<EntryList, HtlcError> {
        self.list(LockType::TimeLocked, address, page_index, page_size)
    }

    #[instrument(skip(self))]
    fn get_entries_by_hash_locked_address(
        &self,
        address: Address,
        page_index: u32,
        page_size: u32,
    ) -> Result<EntryList, HtlcError> {
        self.list(LockType::HashLocked, address, page_index, page_size)
    }

    #[instrument(skip(self))]
    fn get_proxy_unlock_status(&self, address: Address) -> Result<bool, HtlcError> {
        self.with_store(|store| store.proxy_unlock_allowed(&address))
    }
}
