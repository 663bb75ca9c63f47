//! # HTLC Interface
//!
//! Methods and persisted variables of the HTLC embedded contract, plus
//! typed parameter structs for the methods that take arguments.

use super::codec::{Abi, AbiError, AbiType, AbiValue, Method, Variable};
use shared_types::{Address, Hash};

/// `CreateHtlc` method name.
pub const CREATE_HTLC_METHOD_NAME: &str = "CreateHtlc";
/// `ReclaimHtlc` method name.
pub const RECLAIM_HTLC_METHOD_NAME: &str = "ReclaimHtlc";
/// `UnlockHtlc` method name.
pub const UNLOCK_HTLC_METHOD_NAME: &str = "UnlockHtlc";
/// `AllowProxyUnlock` method name.
pub const ALLOW_PROXY_UNLOCK_METHOD_NAME: &str = "AllowProxyUnlock";
/// `DenyProxyUnlock` method name.
pub const DENY_PROXY_UNLOCK_METHOD_NAME: &str = "DenyProxyUnlock";
/// Persisted entry variable name.
pub const VARIABLE_NAME_HTLC_INFO: &str = "htlcInfo";

/// `CreateHtlc(hashLocked, expirationTime, hashType, keyMaxSize, hashLock)`
pub const CREATE_HTLC_METHOD: Method = Method {
    name: CREATE_HTLC_METHOD_NAME,
    inputs: &[
        AbiType::Address,
        AbiType::Int64,
        AbiType::Uint8,
        AbiType::Uint8,
        AbiType::Bytes,
    ],
};

/// `ReclaimHtlc(id)`
pub const RECLAIM_HTLC_METHOD: Method = Method {
    name: RECLAIM_HTLC_METHOD_NAME,
    inputs: &[AbiType::Hash],
};

/// `UnlockHtlc(id, preimage)`
pub const UNLOCK_HTLC_METHOD: Method = Method {
    name: UNLOCK_HTLC_METHOD_NAME,
    inputs: &[AbiType::Hash, AbiType::Bytes],
};

/// `AllowProxyUnlock()`
pub const ALLOW_PROXY_UNLOCK_METHOD: Method = Method {
    name: ALLOW_PROXY_UNLOCK_METHOD_NAME,
    inputs: &[],
};

/// `DenyProxyUnlock()`
pub const DENY_PROXY_UNLOCK_METHOD: Method = Method {
    name: DENY_PROXY_UNLOCK_METHOD_NAME,
    inputs: &[],
};

/// `htlcInfo(timeLocked, hashLocked, tokenStandard, amount, expirationTime, hashType, keyMaxSize, hashLock)`
///
/// The entry id is part of the storage key, not of the value.
pub const HTLC_INFO_VARIABLE: Variable = Variable {
    name: VARIABLE_NAME_HTLC_INFO,
    fields: &[
        AbiType::Address,
        AbiType::Address,
        AbiType::TokenStandard,
        AbiType::Uint256,
        AbiType::Int64,
        AbiType::Uint8,
        AbiType::Uint8,
        AbiType::Bytes,
    ],
};

/// The HTLC contract interface.
pub const ABI_HTLC: Abi = Abi {
    methods: &[
        CREATE_HTLC_METHOD,
        RECLAIM_HTLC_METHOD,
        UNLOCK_HTLC_METHOD,
        ALLOW_PROXY_UNLOCK_METHOD,
        DENY_PROXY_UNLOCK_METHOD,
    ],
    variables: &[HTLC_INFO_VARIABLE],
};

/// Arguments of `CreateHtlc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHtlcParam {
    /// Party that may unlock with the preimage.
    pub hash_locked: Address,
    /// Absolute expiration, seconds.
    pub expiration_time: i64,
    /// Raw hash type tag.
    pub hash_type: u8,
    /// Longest accepted preimage.
    pub key_max_size: u8,
    /// Digest the preimage must hash to.
    pub hash_lock: Vec<u8>,
}

impl CreateHtlcParam {
    /// Unpack from call data.
    pub fn decode(data: &[u8]) -> Result<Self, AbiError> {
        let values = CREATE_HTLC_METHOD.decode_call(data)?;
        let got = values.len();
        match <[AbiValue; 5]>::try_from(values) {
            Ok(
                [AbiValue::Address(hash_locked), AbiValue::Int64(expiration_time), AbiValue::Uint8(hash_type), AbiValue::Uint8(key_max_size), AbiValue::Bytes(hash_lock)],
            ) => Ok(Self {
                hash_locked,
                expiration_time,
                hash_type,
                key_max_size,
                hash_lock,
            }),
            _ => Err(AbiError::ArgumentCount {
                expected: CREATE_HTLC_METHOD.inputs.len(),
                got,
            }),
        }
    }

    /// Pack into call data.
    pub fn encode(&self) -> Result<Vec<u8>, AbiError> {
        CREATE_HTLC_METHOD.encode_call(&[
            AbiValue::Address(self.hash_locked),
            AbiValue::Int64(self.expiration_time),
            AbiValue::Uint8(self.hash_type),
            AbiValue::Uint8(self.key_max_size),
            AbiValue::Bytes(self.hash_lock.clone()),
        ])
    }
}

/// Argument of `ReclaimHtlc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReclaimHtlcParam {
    /// Entry id.
    pub id: Hash,
}

impl ReclaimHtlcParam {
    /// Unpack from call data.
    pub fn decode(data: &[u8]) -> Result<Self, AbiError> {
        match RECLAIM_HTLC_METHOD.decode_call(data)?.as_slice() {
            [AbiValue::Hash(id)] => Ok(Self { id: *id }),
            other => Err(AbiError::ArgumentCount {
                expected: 1,
                got: other.len(),
            }),
        }
    }

    /// Pack into call data.
    pub fn encode(&self) -> Result<Vec<u8>, AbiError> {
        RECLAIM_HTLC_METHOD.encode_call(&[AbiValue::Hash(self.id)])
    }
}

/// Arguments of `UnlockHtlc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockHtlcParam {
    /// Entry id.
    pub id: Hash,
    /// Revealed preimage.
    pub preimage: Vec<u8>,
}

impl UnlockHtlcParam {
    /// Unpack from call data.
    pub fn decode(data: &[u8]) -> Result<Self, AbiError> {
        let values = UNLOCK_HTLC_METHOD.decode_call(data)?;
        let got = values.len();
        match <[AbiValue; 2]>::try_from(values) {
            Ok([AbiValue::Hash(id), AbiValue::Bytes(preimage)]) => Ok(Self { id, preimage }),
            _ => Err(AbiError::ArgumentCount {
                expected: UNLOCK_HTLC_METHOD.inputs.len(),
                got,
            }),
        }
    }

    /// Pack into call data.
    pub fn encode(&self) -> Result<Vec<u8>, AbiError> {
        UNLOCK_HTLC_METHOD.encode_call(&[AbiValue::Hash(self.id), AbiValue::Bytes(self.preimage.clone())])
    }
}
