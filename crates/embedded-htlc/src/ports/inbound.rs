//! # Inbound Ports
//!
//! Read-only query API served from the latest committed state.

use crate::domain::{EntryList, HtlcEntry, HtlcError};
use shared_types::{Address, Hash};

/// HTLC query API - inbound port.
pub trait HtlcQueryApi: Send + Sync {
    /// Entry by id, or `EntryNotFound`.
    fn get_entry_by_id(&self, id: Hash) -> Result<HtlcEntry, HtlcError>;

    /// Entries reclaimable by `address`, sorted by expiration then id.
    fn get_entries_by_time_locked_address(
        &self,
        address: Address,
        page_index: u32,
        page_size: u32,
    ) -> Result<EntryList, HtlcError>;

    /// Entries unlockable by `address`, sorted by expiration then id.
    fn get_entries_by_hash_locked_address(
        &self,
        address: Address,
        page_index: u32,
        page_size: u32,
    ) -> Result<EntryList, HtlcError>;

    /// Whether third parties may unlock on behalf of `address`. Defaults to true.
    fn get_proxy_unlock_status(&self, address: Address) -> Result<bool, HtlcError>;
}
