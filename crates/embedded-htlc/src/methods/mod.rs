//! # Method Handlers
//!
//! One handler per callable HTLC method. Every handler runs the two-phase
//! call protocol:
//!
//! 1. `validate_send_block`: stateless. Unpack the call data, check it,
//!    re-pack it and require the result to equal the input byte-for-byte.
//!    Returns the canonical call data.
//! 2. `receive_block`: stateful. Re-runs validation, then applies the
//!    method's rules against the entry store at the frontier momentum and
//!    returns the outbound blocks to queue.

mod create;
mod proxy;
mod reclaim;
mod unlock;

pub use create::CreateHtlcMethod;
pub use proxy::{AllowProxyUnlockMethod, DenyProxyUnlockMethod};
pub use reclaim::ReclaimHtlcMethod;
pub use unlock::UnlockHtlcMethod;

use crate::abi::Method;
use crate::domain::{HtlcError, PlasmaCategory};
use shared_storage::KeyValueStore;
use shared_types::{AccountBlock, Address, Momentum};

/// State a handler executes against.
pub struct CallContext<'a> {
    /// Contract namespace. Writes are buffered by the dispatcher and only
    /// committed when the handler succeeds.
    pub store: &'a mut dyn KeyValueStore,
    /// Frontier momentum; its timestamp is "now".
    pub momentum: Momentum,
    /// Address the contract lives at, author of outbound blocks.
    pub contract_address: Address,
}

/// A callable embedded-contract method.
pub trait EmbeddedMethod: Send + Sync {
    /// Interface entry of this method.
    fn method(&self) -> &'static Method;

    /// Method name.
    fn name(&self) -> &'static str {
        self.method().name
    }

    /// Plasma cost class of a call.
    fn plasma_category(&self) -> PlasmaCategory;

    /// Stateless validation. Returns the canonical call data.
    fn validate_send_block(&self, block: &AccountBlock) -> Result<Vec<u8>, HtlcError>;

    /// Stateful execution. Returns outbound blocks.
    fn receive_block(
        &self,
        ctx: &mut CallContext<'_>,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>, HtlcError>;
}

/// All HTLC handlers, in interface order.
pub fn htlc_methods() -> Vec<Box<dyn EmbeddedMethod>> {
    vec![
        Box::new(CreateHtlcMethod),
        Box::new(ReclaimHtlcMethod),
        Box::new(UnlockHtlcMethod),
        Box::new(AllowProxyUnlockMethod),
        Box::new(DenyProxyUnlockMethod),
    ]
}

/// Reject call data that differs from its re-packed form.
pub(crate) fn ensure_canonical(data: &[u8], canonical: &[u8]) -> Result<(), HtlcError> {
    if data != canonical {
        return Err(HtlcError::InvalidCallEncoding {
            reason: format!(
                "non-canonical encoding: got {} bytes, canonical form is {} bytes",
                data.len(),
                canonical.len()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use shared_types::{BlockType, Hash, TokenStandard, U256, ZNN_TOKEN_STANDARD};

    pub const CONTRACT: Address = shared_types::HTLC_CONTRACT_ADDRESS;

    pub fn send_block(from: Address, amount: u64, data: Vec<u8>) -> AccountBlock {
        send_block_with_token(from, amount, ZNN_TOKEN_STANDARD, data)
    }

    pub fn send_block_with_token(
        from: Address,
        amount: u64,
        token_standard: TokenStandard,
        data: Vec<u8>,
    ) -> AccountBlock {
        AccountBlock {
            block_type: BlockType::UserSend,
            hash: Hash([0xcc; 32]),
            address: from,
            to_address: CONTRACT,
            amount: U256::from(amount),
            token_standard,
            data,
        }
    }

    pub fn momentum(timestamp: i64) -> Momentum {
        Momentum {
            height: 10,
            hash: Hash([0x10; 32]),
            timestamp,
        }
    }
}
