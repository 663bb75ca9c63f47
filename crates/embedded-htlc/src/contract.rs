//! # HTLC Contract Dispatcher
//!
//! Entry point the ledger calls for every block addressed to the HTLC
//! contract.
//!
//! ## Flow
//!
//! ```text
//! send block ──→ feature gate ──→ selector ──→ handler.validate_send_block
//!                                          └─→ handler.receive_block
//!                                                 │
//!                                      OverlayStore over VmContext storage
//!                                                 │
//!                                Ok  ──→ atomic_batch_write(overlay ops)
//!                                Err ──→ overlay dropped, state untouched
//! ```

use crate::abi::{AbiError, Selector, SELECTOR_SIZE};
use crate::adapters::SporkFeatureGate;
use crate::config::HtlcConfig;
use crate::domain::{HtlcError, PlasmaCategory};
use crate::methods::{htlc_methods, CallContext, EmbeddedMethod};
use crate::ports::outbound::{FeatureGate, SporkOracle, VmContext};
use ledger_telemetry::contract_span;
use shared_storage::OverlayStore;
use shared_types::{AccountBlock, Address};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// The HTLC embedded contract.
pub struct HtlcContract {
    config: HtlcConfig,
    gate: Arc<dyn FeatureGate>,
    methods: Vec<Box<dyn EmbeddedMethod>>,
}

impl HtlcContract {
    /// Contract gated by `gate`.
    pub fn new(config: HtlcConfig, gate: Arc<dyn FeatureGate>) -> Self {
        Self {
            config,
            gate,
            methods: htlc_methods(),
        }
    }

    /// Contract gated by the configured spork in `oracle`.
    pub fn with_spork_oracle(config: HtlcConfig, oracle: Arc<dyn SporkOracle>) -> Self {
        let gate = Arc::new(SporkFeatureGate::new(oracle, config.htlc_spork_id));
        Self::new(config, gate)
    }

    /// Active configuration.
    pub fn config(&self) -> &HtlcConfig {
        &self.config
    }

    /// Address the contract lives at.
    pub fn address(&self) -> Address {
        self.config.contract_address
    }

    fn ensure_enforced(&self) -> Result<(), HtlcError> {
        if !self.gate.is_enforced()? {
            warn!(spork = %self.config.htlc_spork_id, "htlc call refused - feature not enforced");
            return Err(HtlcError::FeatureNotEnforced);
        }
        Ok(())
    }

    fn resolve(&self, data: &[u8]) -> Result<&dyn EmbeddedMethod, HtlcError> {
        let selector = Selector::from_call_data(data).ok_or_else(|| {
            HtlcError::call_encoding(AbiError::InputTooShort {
                expected: SELECTOR_SIZE,
                got: data.len(),
            })
        })?;
        self.methods
            .iter()
            .find(|method| method.method().selector() == selector)
            .map(|method| &**method)
            .ok_or_else(|| HtlcError::UnknownMethod {
                selector: selector.to_string(),
            })
    }

    /// Name of the method `data` calls.
    pub fn method_name(&self, data: &[u8]) -> Result<&'static str, HtlcError> {
        Ok(self.resolve(data)?.name())
    }

    /// Plasma cost class of a call.
    pub fn plasma_category(&self, data: &[u8]) -> Result<PlasmaCategory, HtlcError> {
        Ok(self.resolve(data)?.plasma_category())
    }

    /// Phase 1: stateless validation before the block is admitted.
    ///
    /// Returns the canonical call data, which always equals `block.data`.
    pub fn validate_send_block(&self, block: &AccountBlock) -> Result<Vec<u8>, HtlcError> {
        self.ensure_enforced()?;
        let method = self.resolve(&block.data)?;
        method
            .validate_send_block(block)
            .inspect_err(|err| debug!(%err, method = method.name(), block = %block.hash, "send block rejected"))
    }

    /// Phase 2: execute `send_block` against `ctx`.
    ///
    /// Handler writes go to an overlay and reach `ctx` in one batch only
    /// when the handler succeeds.
    pub fn receive_block<C: VmContext + ?Sized>(
        &self,
        ctx: &mut C,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>, HtlcError> {
        self.ensure_enforced()?;
        let method = self.resolve(&send_block.data)?;
        let _span = contract_span!(
            "receive_block",
            contract = "htlc",
            method = method.name(),
            block = %send_block.hash,
            caller = %send_block.address
        )
        .entered();

        let momentum = ctx.frontier_momentum()?;
        let mut overlay = OverlayStore::new(ctx.storage());
        let mut call = CallContext {
            store: &mut overlay,
            momentum,
            contract_address: self.config.contract_address,
        };

        let result = method.receive_block(&mut call, send_block);
        let outbound = match result {
            Ok(outbound) => outbound,
            Err(err) if err.is_fatal() => {
                error!(%err, "htlc execution aborted");
                return Err(err);
            }
            Err(err) => {
                debug!(%err, "htlc call rejected");
                return Err(err);
            }
        };

        let operations = overlay.into_operations();
        let writes = operations.len();
        ctx.storage_mut()
            .atomic_batch_write(operations)
            .map_err(HtlcError::from)
            .inspect_err(|err| error!(%err, writes, "htlc commit failed"))?;

        debug!(writes, outbound = outbound.len(), "htlc call committed");
        Ok(outbound)
    }
}
