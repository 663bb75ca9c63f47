//! # Hash Verifier
//!
//! Digest table for the supported hash types. Adding a type means one new
//! `HashType` variant plus one arm in each match below.

use crate::domain::HashType;
use sha2::Sha256;
use sha3::{Digest, Sha3_256};

/// Digest size in bytes of `hash_type`.
pub const fn digest_size(hash_type: HashType) -> usize {
    match hash_type {
        HashType::Sha3 => 32,
        HashType::Sha256 => 32,
    }
}

/// Digest of `preimage` under `hash_type`.
pub fn digest(hash_type: HashType, preimage: &[u8]) -> Vec<u8> {
    match hash_type {
        HashType::Sha3 => Sha3_256::digest(preimage).to_vec(),
        HashType::Sha256 => Sha256::digest(preimage).to_vec(),
    }
}

/// Whether `preimage` hashes to `hash_lock` under `hash_type`.
pub fn verify(hash_type: HashType, preimage: &[u8], hash_lock: &[u8]) -> bool {
    digest(hash_type, preimage) == hash_lock
}
