//! # Domain Value Objects
//!
//! Immutable value types for the HTLC contract.

use super::errors::HtlcError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Digest function selected by an entry.
///
/// Tags are part of the call interface and the persisted entry, so they
/// never change. Tag 2 (HASH160) was reserved historically and is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum HashType {
    /// SHA3-256.
    Sha3 = 0,
    /// SHA-256.
    Sha256 = 1,
}

impl HashType {
    /// Wire tag.
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for HashType {
    type Error = HtlcError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(HashType::Sha3),
            1 => Ok(HashType::Sha256),
            other => Err(HtlcError::InvalidHashType(other)),
        }
    }
}

impl From<HashType> for u8 {
    fn from(hash_type: HashType) -> Self {
        hash_type.tag()
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashType::Sha3 => f.write_str("SHA3"),
            HashType::Sha256 => f.write_str("SHA256"),
        }
    }
}

/// Which side of an entry a secondary index is keyed by.
///
/// The discriminant is the storage key prefix of that index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LockType {
    /// Indexed by the address that may reclaim after expiration.
    TimeLocked = 2,
    /// Indexed by the address that may unlock with the preimage.
    HashLocked = 3,
}

impl LockType {
    /// Storage key prefix of this index.
    pub const fn prefix(self) -> u8 {
        self as u8
    }
}

/// Plasma cost class of an embedded method.
///
/// Only the class is chosen here; pricing belongs to the plasma contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlasmaCategory {
    /// Bookkeeping-only call.
    EmbeddedSimple,
    /// Call that pays funds out of the contract.
    EmbeddedWithdraw,
}
