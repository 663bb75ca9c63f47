//! `ReclaimHtlc`: return expired funds to the time-locked address.

use super::{ensure_canonical, CallContext, EmbeddedMethod};
use crate::abi::{Method, ReclaimHtlcParam, RECLAIM_HTLC_METHOD};
use crate::adapters::EntryStore;
use crate::domain::invariants::{invariant_can_reclaim, invariant_reclaim_due, invariant_zero_amount};
use crate::domain::{HtlcError, PlasmaCategory};
use shared_types::AccountBlock;
use tracing::debug;

/// Handler of `ReclaimHtlc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReclaimHtlcMethod;

impl ReclaimHtlcMethod {
    fn parse(block: &AccountBlock) -> Result<ReclaimHtlcParam, HtlcError> {
        let param = ReclaimHtlcParam::decode(&block.data).map_err(HtlcError::call_encoding)?;
        invariant_zero_amount(&block.amount)?;

        let canonical = param.encode().map_err(HtlcError::call_encoding)?;
        ensure_canonical(&block.data, &canonical)?;
        Ok(param)
    }
}

impl EmbeddedMethod for ReclaimHtlcMethod {
    fn method(&self) -> &'static Method {
        &RECLAIM_HTLC_METHOD
    }

    fn plasma_category(&self) -> PlasmaCategory {
        PlasmaCategory::EmbeddedWithdraw
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<Vec<u8>, HtlcError> {
        Self::parse(block)?;
        Ok(block.data.clone())
    }

    fn receive_block(
        &self,
        ctx: &mut CallContext<'_>,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>, HtlcError> {
        let param = Self::parse(send_block)
            .inspect_err(|err| debug!(%err, "invalid reclaim - syntactic validation failed"))?;

        let mut store = EntryStore::new(&mut *ctx.store);
        let Some(entry) = store.get(&param.id)? else {
            debug!(id = %param.id, "invalid reclaim - entry does not exist");
            return Err(HtlcError::EntryNotFound(param.id));
        };

        invariant_can_reclaim(&entry, &send_block.address).inspect_err(|_| {
            debug!(id = %entry.id, caller = %send_block.address, "invalid reclaim - permission denied")
        })?;

        let now = ctx.momentum.timestamp;
        invariant_reclaim_due(&entry, now).inspect_err(|_| {
            debug!(
                id = %entry.id,
                expiration_time = entry.expiration_time,
                now, "invalid reclaim - entry not expired"
            )
        })?;

        store.remove(&entry)?;

        debug!(
            id = %entry.id,
            time_locked = %entry.time_locked,
            token_standard = %entry.token_standard,
            amount = %entry.amount,
            "reclaimed"
        );
        Ok(vec![AccountBlock::contract_send(
            ctx.contract_address,
            entry.time_locked,
            entry.amount,
            entry.token_standard,
        )])
    }
}
