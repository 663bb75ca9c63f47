//! Ledger-backed execution context.
//!
//! Opens the contract's namespace inside the ledger store for the length
//! of one state transition and pins the frontier momentum it runs against.

use crate::domain::HtlcError;
use crate::ports::outbound::VmContext;
use shared_storage::{KeyValueReader, KeyValueStore, NamespacedStore};
use shared_types::{Address, Momentum};

/// Storage namespace of the embedded contract living at `contract`.
pub fn contract_namespace(contract: &Address) -> Vec<u8> {
    contract.as_bytes().to_vec()
}

/// `VmContext` over a ledger store.
pub struct LedgerContext<S> {
    storage: NamespacedStore<S>,
    momentum: Momentum,
}

impl<S: KeyValueStore> LedgerContext<S> {
    /// Context for the contract at `contract`, executing at `momentum`.
    pub fn new(ledger: S, contract: &Address, momentum: Momentum) -> Self {
        Self {
            storage: NamespacedStore::new(ledger, contract_namespace(contract)),
            momentum,
        }
    }
}

impl<S: KeyValueStore> VmContext for LedgerContext<S> {
    fn frontier_momentum(&self) -> Result<Momentum, HtlcError> {
        Ok(self.momentum)
    }

    fn storage(&self) -> &dyn KeyValueReader {
        &self.storage
    }

    fn storage_mut(&mut self) -> &mut dyn KeyValueStore {
        &mut self.storage
    }
}
