//! Spork-backed feature gate.
//!
//! Implements `FeatureGate` by asking the governance registry whether the
//! configured HTLC spork has been activated.

use crate::domain::HtlcError;
use crate::ports::outbound::{FeatureGate, SporkOracle};
use parking_lot::RwLock;
use shared_types::Hash;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Feature gate reading one spork id from a `SporkOracle`.
#[derive(Clone)]
pub struct SporkFeatureGate {
    oracle: Arc<dyn SporkOracle>,
    spork_id: Hash,
}

impl SporkFeatureGate {
    /// Gate on `spork_id`.
    pub fn new(oracle: Arc<dyn SporkOracle>, spork_id: Hash) -> Self {
        Self { oracle, spork_id }
    }
}

impl FeatureGate for SporkFeatureGate {
    fn is_enforced(&self) -> Result<bool, HtlcError> {
        self.oracle.is_spork_active(&self.spork_id)
    }
}

/// In-memory spork registry.
///
/// In production the registry is the spork embedded contract's state.
#[derive(Default)]
pub struct InMemorySporkOracle {
    active: RwLock<HashSet<Hash>>,
}

impl InMemorySporkOracle {
    /// Registry with no active sporks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a spork.
    pub fn activate(&self, spork_id: Hash) {
        info!(spork = %spork_id, "spork activated");
        self.active.write().insert(spork_id);
    }
}

impl SporkOracle for InMemorySporkOracle {
    fn is_spork_active(&self, spork_id: &Hash) -> Result<bool, HtlcError> {
        Ok(self.active.read().contains(spork_id))
    }
}
