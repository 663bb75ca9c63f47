//! Call-data codec and the HTLC contract interface.

pub mod codec;
pub mod definition;

pub use codec::{Abi, AbiError, AbiType, AbiValue, Method, Selector, Variable, SELECTOR_SIZE, WORD_SIZE};
pub use definition::{
    CreateHtlcParam, ReclaimHtlcParam, UnlockHtlcParam, ABI_HTLC, ALLOW_PROXY_UNLOCK_METHOD,
    CREATE_HTLC_METHOD, DENY_PROXY_UNLOCK_METHOD, HTLC_INFO_VARIABLE, RECLAIM_HTLC_METHOD,
    UNLOCK_HTLC_METHOD,
};
