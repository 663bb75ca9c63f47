//! # Domain Entities
//!
//! Persisted records of the HTLC contract.

use super::value_objects::{HashType, LockType};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared_types::{Address, Hash, TokenStandard, U256};

/// A live hash-time-locked entry.
///
/// Born on `CreateHtlc`, removed by exactly one successful `UnlockHtlc`
/// or `ReclaimHtlc`. Never updated in between.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtlcEntry {
    /// Hash of the creating send block.
    pub id: Hash,
    /// May reclaim once expired. Always the creator.
    pub time_locked: Address,
    /// May unlock with the preimage before expiration; always receives the unlock payout.
    pub hash_locked: Address,
    /// Locked token.
    pub token_standard: TokenStandard,
    /// Locked amount.
    #[serde(with = "decimal_u256")]
    pub amount: U256,
    /// Absolute expiration, momentum seconds.
    pub expiration_time: i64,
    /// Digest function of `hash_lock`.
    pub hash_type: HashType,
    /// Longest accepted preimage, bytes.
    pub key_max_size: u8,
    /// Digest the preimage must hash to.
    #[serde(with = "hex_lock")]
    pub hash_lock: Vec<u8>,
}

impl HtlcEntry {
    /// Address indexing this entry under `lock_type`.
    pub fn locked_address(&self, lock_type: LockType) -> Address {
        match lock_type {
            LockType::TimeLocked => self.time_locked,
            LockType::HashLocked => self.hash_locked,
        }
    }
}

/// A secondary index reference: `(lock_type, address, id)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HtlcRef {
    /// Index the reference belongs to.
    pub lock_type: LockType,
    /// Indexed address.
    pub address: Address,
    /// Referenced entry id.
    pub id: Hash,
}

/// One page of a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryList {
    /// Total matching entries before paging.
    pub count: usize,
    /// Entries on this page.
    pub list: Vec<HtlcEntry>,
}

mod decimal_u256 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        U256::from_dec_str(&s).map_err(|e| serde::de::Error::custom(format!("{e:?}")))
    }
}

mod hex_lock {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ZNN_TOKEN_STANDARD;

    fn sample_entry() -> HtlcEntry {
        HtlcEntry {
            id: Hash([1u8; 32]),
            time_locked: Address([2u8; 20]),
            hash_locked: Address([3u8; 20]),
            token_standard: ZNN_TOKEN_STANDARD,
            amount: U256::from(100_000_000u64),
            expiration_time: 1_000_300,
            hash_type: HashType::Sha256,
            key_max_size: 32,
            hash_lock: vec![0xab; 32],
        }
    }

    #[test]
    fn test_locked_address() {
        let entry = sample_entry();
        assert_eq!(entry.locked_address(LockType::TimeLocked), Address([2u8; 20]));
        assert_eq!(entry.locked_address(LockType::HashLocked), Address([3u8; 20]));
    }

    #[test]
    fn test_entry_json_shape() {
        let json = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(json["amount"], "100000000");
        assert_eq!(json["expirationTime"], 1_000_300);
        assert_eq!(json["hashType"], 1);
        assert_eq!(json["keyMaxSize"], 32);
        assert_eq!(json["hashLock"], hex::encode([0xab; 32]));
        assert!(json["timeLocked"].as_str().unwrap().starts_with("0x0202"));
    }

    #[test]
    fn test_entry_json_back() {
        let entry = sample_entry();
        let text = serde_json::to_string(&entry).unwrap();
        let back: HtlcEntry = serde_json::from_str(&text).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_entry_json_rejects_unknown_hash_type() {
        let mut json = serde_json::to_value(sample_entry()).unwrap();
        json["hashType"] = serde_json::json!(2);
        assert!(serde_json::from_value::<HtlcEntry>(json).is_err());
    }
}
