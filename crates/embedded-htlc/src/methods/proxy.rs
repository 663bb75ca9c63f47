//! `AllowProxyUnlock` / `DenyProxyUnlock`: the caller's proxy unlock preference.

use super::{ensure_canonical, CallContext, EmbeddedMethod};
use crate::abi::{Method, ALLOW_PROXY_UNLOCK_METHOD, DENY_PROXY_UNLOCK_METHOD};
use crate::adapters::EntryStore;
use crate::domain::invariants::invariant_zero_amount;
use crate::domain::{HtlcError, PlasmaCategory};
use shared_types::AccountBlock;
use tracing::debug;

fn parse(method: &Method, block: &AccountBlock) -> Result<(), HtlcError> {
    method.decode_call(&block.data).map_err(HtlcError::call_encoding)?;
    invariant_zero_amount(&block.amount)?;

    let canonical = method.encode_call(&[]).map_err(HtlcError::call_encoding)?;
    ensure_canonical(&block.data, &canonical)
}

fn set_preference(
    method: &Method,
    allowed: bool,
    ctx: &mut CallContext<'_>,
    send_block: &AccountBlock,
) -> Result<Vec<AccountBlock>, HtlcError> {
    parse(method, send_block).inspect_err(|err| {
        debug!(%err, method = method.name, "invalid proxy unlock call - syntactic validation failed")
    })?;

    EntryStore::new(&mut *ctx.store).set_proxy_unlock(&send_block.address, allowed)?;
    Ok(Vec::new())
}

/// Handler of `AllowProxyUnlock`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowProxyUnlockMethod;

impl EmbeddedMethod for AllowProxyUnlockMethod {
    fn method(&self) -> &'static Method {
        &ALLOW_PROXY_UNLOCK_METHOD
    }

    fn plasma_category(&self) -> PlasmaCategory {
        PlasmaCategory::EmbeddedSimple
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<Vec<u8>, HtlcError> {
        parse(self.method(), block)?;
        Ok(block.data.clone())
    }

    fn receive_block(
        &self,
        ctx: &mut CallContext<'_>,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>, HtlcError> {
        let outbound = set_preference(self.method(), true, ctx, send_block)?;
        debug!(address = %send_block.address, "allow proxy unlock");
        Ok(outbound)
    }
}

/// Handler of `DenyProxyUnlock`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyProxyUnlockMethod;

impl EmbeddedMethod for DenyProxyUnlockMethod {
    fn method(&self) -> &'static Method {
        &DENY_PROXY_UNLOCK_METHOD
    }

    fn plasma_category(&self) -> PlasmaCategory {
        PlasmaCategory::EmbeddedSimple
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<Vec<u8>, HtlcError> {
        parse(self.method(), block)?;
        Ok(block.data.clone())
    }

    fn receive_block(
        &self,
        ctx: &mut CallContext<'_>,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>, HtlcError> {
        let outbound = set_preference(self.method(), false, ctx, send_block)?;
        debug!(address = %send_block.address, "deny proxy unlock");
        Ok(outbound)
    }
}
