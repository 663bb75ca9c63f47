//! # Core Ledger Entities
//!
//! Primitives of the account-block ledger that every embedded contract
//! reads or produces.
//!
//! ## Clusters
//!
//! - **Identity**: `Hash`, `Address`, `TokenStandard`
//! - **Chain**: `AccountBlock`, `BlockType`, `Momentum`

use crate::errors::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// Implements the shared surface of a fixed-width byte identifier:
/// constructors, hex `Debug`/`Display`/`FromStr` and hex-string serde.
macro_rules! fixed_bytes {
    ($name:ident, $len:expr) => {
        impl $name {
            /// Length in bytes.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Creates a value from a fixed-size array.
            #[must_use]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Creates a value from a slice. Returns None if wrong length.
            #[must_use]
            pub fn from_slice(slice: &[u8]) -> Option<Self> {
                let bytes: [u8; $len] = slice.try_into().ok()?;
                Some(Self(bytes))
            }

            /// Returns the underlying bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns true if every byte is zero.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), hex::encode(self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(raw).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
                Self::from_slice(&bytes).ok_or(TypeError::InvalidLength {
                    kind: stringify!($name),
                    expected: $len,
                    got: bytes.len(),
                })
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// =============================================================================
// IDENTITY
// =============================================================================

/// A 32-byte hash (block hashes, entry ids, spork ids).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash(pub [u8; 32]);

fixed_bytes!(Hash, 32);

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

fixed_bytes!(Address, 20);

/// A 10-byte token standard identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenStandard(pub [u8; 10]);

fixed_bytes!(TokenStandard, 10);

/// Native coin of the ledger.
pub const ZNN_TOKEN_STANDARD: TokenStandard =
    TokenStandard([0x14, 0xe6, 0x6c, 0xe8, 0x8c, 0xb3, 0x4b, 0x08, 0xd2, 0x43]);

/// Native fuel token of the ledger.
pub const QSR_TOKEN_STANDARD: TokenStandard =
    TokenStandard([0x04, 0xe6, 0x6c, 0xe8, 0x8c, 0xb3, 0x4b, 0x08, 0xd2, 0x43]);

// =============================================================================
// EMBEDDED CONTRACT ADDRESSES
// =============================================================================

const fn embedded_address(index: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0x02;
    bytes[19] = index;
    Address(bytes)
}

/// Reserved address of the spork (governance flag) contract.
pub const SPORK_CONTRACT_ADDRESS: Address = embedded_address(0x0a);

/// Reserved address of the hash-time-locked contract.
pub const HTLC_CONTRACT_ADDRESS: Address = embedded_address(0x0b);

impl Address {
    /// Returns true if this address belongs to an embedded contract.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.0[0] == 0x02 && self.0[1..19] == [0u8; 18]
    }
}

// =============================================================================
// CHAIN
// =============================================================================

/// Kind of an account block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    /// Send block authored by a user account.
    UserSend,
    /// Receive block authored by a user account.
    UserReceive,
    /// Send block emitted by an embedded contract.
    ContractSend,
    /// Receive block applied by an embedded contract.
    ContractReceive,
}

impl BlockType {
    /// Returns true for both flavours of send block.
    #[must_use]
    pub fn is_send(&self) -> bool {
        matches!(self, BlockType::UserSend | BlockType::ContractSend)
    }
}

/// One side of a transfer in the account-block model.
///
/// A send block carries the call data addressed to `to_address`;
/// contract execution consumes it and may emit further send blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBlock {
    /// Block kind.
    pub block_type: BlockType,
    /// Hash of the block. For a call this is the transaction id.
    pub hash: Hash,
    /// Author of the block.
    pub address: Address,
    /// Recipient of the transfer.
    pub to_address: Address,
    /// Transferred amount.
    pub amount: U256,
    /// Token of the transferred amount.
    pub token_standard: TokenStandard,
    /// Call data.
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
}

impl AccountBlock {
    /// Builds an outbound transfer emitted by an embedded contract.
    ///
    /// The block hash is assigned by the ledger when the block is inserted.
    #[must_use]
    pub fn contract_send(
        contract: Address,
        to_address: Address,
        amount: U256,
        token_standard: TokenStandard,
    ) -> Self {
        Self {
            block_type: BlockType::ContractSend,
            hash: Hash::ZERO,
            address: contract,
            to_address,
            amount,
            token_standard,
            data: Vec::new(),
        }
    }
}

/// A finalized ledger block providing the canonical current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Momentum {
    /// Height in the momentum chain.
    pub height: u64,
    /// Momentum hash.
    pub hash: Hash,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
