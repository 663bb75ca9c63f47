//! `UnlockHtlc`: release funds to the hash-locked address against the preimage.

use super::{ensure_canonical, CallContext, EmbeddedMethod};
use crate::abi::{Method, UnlockHtlcParam, UNLOCK_HTLC_METHOD};
use crate::adapters::EntryStore;
use crate::domain::invariants::{
    invariant_can_unlock, invariant_not_expired, invariant_preimage_matches, invariant_preimage_size,
    invariant_zero_amount,
};
use crate::domain::{HtlcError, PlasmaCategory};
use shared_types::AccountBlock;
use tracing::debug;

/// Handler of `UnlockHtlc`.
///
/// The payout always goes to the entry's hash-locked address, whoever
/// submitted the preimage.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlockHtlcMethod;

impl UnlockHtlcMethod {
    fn parse(block: &AccountBlock) -> Result<UnlockHtlcParam, HtlcError> {
        let param = UnlockHtlcParam::decode(&block.data).map_err(HtlcError::call_encoding)?;
        invariant_zero_amount(&block.amount)?;

        let canonical = param.encode().map_err(HtlcError::call_encoding)?;
        ensure_canonical(&block.data, &canonical)?;
        Ok(param)
    }
}

impl EmbeddedMethod for UnlockHtlcMethod {
    fn method(&self) -> &'static Method {
        &UNLOCK_HTLC_METHOD
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
            .inspect_err(|err| debug!(%err, "invalid unlock - syntactic validation failed"))?;

        let mut store = EntryStore::new(&mut *ctx.store);
        let Some(entry) = store.get(&param.id)? else {
            debug!(id = %param.id, "invalid unlock - entry does not exist");
            return Err(HtlcError::EntryNotFound(param.id));
        };

        let caller = send_block.address;
        let proxy_allowed = store.proxy_unlock_allowed(&entry.hash_locked)?;
        invariant_can_unlock(&entry, &caller, proxy_allowed).inspect_err(|_| {
            debug!(id = %entry.id, caller = %caller, "invalid unlock - permission denied")
        })?;

        let now = ctx.momentum.timestamp;
        invariant_not_expired(&entry, now).inspect_err(|_| {
            debug!(
                id = %entry.id,
                expiration_time = entry.expiration_time,
                now, "invalid unlock - entry is expired"
            )
        })?;

        invariant_preimage_size(&entry, &param.preimage).inspect_err(|_| {
            debug!(
                id = %entry.id,
                preimage_len = param.preimage.len(),
                key_max_size = entry.key_max_size,
                "invalid unlock - preimage size greater than entry KeyMaxSize"
            )
        })?;

        invariant_preimage_matches(&entry, &param.preimage)
            .inspect_err(|_| debug!(id = %entry.id, "invalid unlock - wrong preimage"))?;

        store.remove(&entry)?;

        debug!(
            id = %entry.id,
            caller = %caller,
            hash_locked = %entry.hash_locked,
            token_standard = %entry.token_standard,
            amount = %entry.amount,
            preimage = %hex::encode(&param.preimage),
            "unlocked"
        );
        Ok(vec![AccountBlock::contract_send(
            ctx.contract_address,
            entry.hash_locked,
            entry.amount,
            entry.token_standard,
        )])
    }
}
