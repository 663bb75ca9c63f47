//! # Outbound Ports
//!
//! What the HTLC contract consumes from the surrounding ledger: the
//! execution context of one state transition and the governance flag
//! that switches the contract on.

use crate::domain::HtlcError;
use shared_storage::{KeyValueReader, KeyValueStore};
use shared_types::{Hash, Momentum};

/// Execution context of one inbound block - outbound port.
///
/// Both storage views address the contract's own namespace.
pub trait VmContext {
    /// Momentum whose timestamp is "now" for this execution.
    fn frontier_momentum(&self) -> Result<Momentum, HtlcError>;

    /// Read view of the contract namespace.
    fn storage(&self) -> &dyn KeyValueReader;

    /// Write view of the contract namespace.
    fn storage_mut(&mut self) -> &mut dyn KeyValueStore;
}

/// Governance spork registry - outbound port.
pub trait SporkOracle: Send + Sync {
    /// Whether the spork with this id has been activated.
    fn is_spork_active(&self, spork_id: &Hash) -> Result<bool, HtlcError>;
}

/// Feature gate consulted before any HTLC method runs - outbound port.
pub trait FeatureGate: Send + Sync {
    /// Whether the HTLC contract is enforced on this chain.
    fn is_enforced(&self) -> Result<bool, HtlcError>;
}

// =============================================================================
// MOCK IMPLEMENTATION
// =============================================================================

/// Feature gate with a fixed answer, for tests.
#[derive(Clone, Copy, Debug)]
pub struct StaticFeatureGate(pub bool);

impl FeatureGate for StaticFeatureGate {
    fn is_enforced(&self) -> Result<bool, HtlcError> {
        Ok(self.0)
    }
}
