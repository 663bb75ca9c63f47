//! # Adapters
//!
//! Implementations of the storage schema and outbound ports.

pub mod entry_store;
pub mod ledger_context;
pub mod spork_gate;

pub use entry_store::EntryStore;
pub use ledger_context::{contract_namespace, LedgerContext};
pub use spork_gate::{InMemorySporkOracle, SporkFeatureGate};
