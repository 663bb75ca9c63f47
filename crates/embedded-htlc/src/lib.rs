//! # Embedded HTLC Contract
//!
//! Hash-time-locked contract living at a reserved ledger address. Funds
//! sent with `CreateHtlc` are custodied by the contract until either the
//! hash-locked address reveals the preimage (`UnlockHtlc`) or the lock
//! expires and the creator takes them back (`ReclaimHtlc`).
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Rules
//!
//! | Rule | Enforced by |
//! |------|-------------|
//! | Entry and both index refs live and die together | `EntryStore::insert` / `EntryStore::remove`, dispatcher overlay |
//! | Reclaim only by the time-locked address, once `now >= expiration` | `invariant_can_reclaim`, `invariant_reclaim_due` |
//! | Unlock while `now <= expiration`, payout always to the hash-locked address | `UnlockHtlcMethod` |
//! | Preimage length checked before hashing | `invariant_preimage_size` |
//! | Call data must be canonical | every handler's validation phase |
//! | No method runs before the HTLC spork is active | `HtlcContract` feature gate |
//!
//! ## Module Structure
//!
//! ```text
//! embedded-htlc/
//! ├── abi/         # Call-data codec, HTLC interface, typed params
//! ├── domain/      # HtlcEntry, HashType, HtlcError, invariants
//! ├── algorithms/  # Hash verification, listing order and paging
//! ├── ports/       # HtlcQueryApi, VmContext, FeatureGate, SporkOracle
//! ├── adapters/    # EntryStore, LedgerContext, SporkFeatureGate
//! ├── methods/     # One handler per callable method
//! ├── contract.rs  # Dispatcher: gate, selector, atomic commit
//! ├── service.rs   # Read-only query API
//! └── config.rs    # HtlcConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod contract;
pub mod domain;
pub mod methods;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{contract_namespace, EntryStore, InMemorySporkOracle, LedgerContext, SporkFeatureGate};
pub use algorithms::{paginate, sort_entries};
pub use config::{ConfigError, HtlcConfig, DEFAULT_HTLC_SPORK_ID, DEFAULT_MAX_PAGE_SIZE};
pub use contract::HtlcContract;
pub use domain::{
    EntryList, HashType, HtlcEntry, HtlcError, HtlcRef, LockType, PlasmaCategory,
};
pub use methods::{CallContext, EmbeddedMethod};
pub use ports::{FeatureGate, HtlcQueryApi, SporkOracle, StaticFeatureGate, VmContext};
pub use service::HtlcApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
