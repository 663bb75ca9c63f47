//! # Domain Invariants
//!
//! Business rules of the HTLC state machine. Handlers call these in a
//! fixed order; each returns the rejection its rule maps to.

use super::entities::HtlcEntry;
use super::errors::HtlcError;
use super::value_objects::HashType;
use crate::algorithms::hash_verifier;
use shared_types::{Address, U256};

/// Invariant: a hash lock has exactly the digest size of its hash type.
pub fn invariant_digest_length(hash_type: HashType, hash_lock: &[u8]) -> Result<(), HtlcError> {
    let expected = hash_verifier::digest_size(hash_type);
    if hash_lock.len() != expected {
        return Err(HtlcError::InvalidHashDigestLength {
            expected,
            got: hash_lock.len(),
        });
    }
    Ok(())
}

/// Invariant: entries lock a non-zero amount.
pub fn invariant_positive_amount(amount: &U256) -> Result<(), HtlcError> {
    if amount.is_zero() {
        return Err(HtlcError::InvalidTokenOrAmount);
    }
    Ok(())
}

/// Invariant: control calls carry no value.
pub fn invariant_zero_amount(amount: &U256) -> Result<(), HtlcError> {
    if !amount.is_zero() {
        return Err(HtlcError::InvalidTokenOrAmount);
    }
    Ok(())
}

/// Invariant: expiration is strictly after the creating momentum.
pub fn invariant_expiration_in_future(expiration_time: i64, now: i64) -> Result<(), HtlcError> {
    if expiration_time <= now {
        return Err(HtlcError::InvalidExpirationTime {
            expiration_time,
            now,
        });
    }
    Ok(())
}

/// Invariant: only the time-locked address reclaims. There is no proxy reclaim.
pub fn invariant_can_reclaim(entry: &HtlcEntry, caller: &Address) -> Result<(), HtlcError> {
    if entry.time_locked != *caller {
        return Err(HtlcError::PermissionDenied);
    }
    Ok(())
}

/// Invariant: reclaim is due once `now >= expiration_time`.
pub fn invariant_reclaim_due(entry: &HtlcEntry, now: i64) -> Result<(), HtlcError> {
    if now < entry.expiration_time {
        return Err(HtlcError::ReclaimNotDue {
            expiration_time: entry.expiration_time,
            now,
        });
    }
    Ok(())
}

/// Invariant: the hash-locked address unlocks, or anyone while it allows proxy unlock.
pub fn invariant_can_unlock(
    entry: &HtlcEntry,
    caller: &Address,
    proxy_unlock_allowed: bool,
) -> Result<(), HtlcError> {
    if entry.hash_locked != *caller && !proxy_unlock_allowed {
        return Err(HtlcError::PermissionDenied);
    }
    Ok(())
}

/// Invariant: unlock is possible while `now <= expiration_time`.
pub fn invariant_not_expired(entry: &HtlcEntry, now: i64) -> Result<(), HtlcError> {
    if now > entry.expiration_time {
        return Err(HtlcError::Expired {
            expiration_time: entry.expiration_time,
            now,
        });
    }
    Ok(())
}

/// Invariant: preimage fits `key_max_size`. Checked before hashing.
pub fn invariant_preimage_size(entry: &HtlcEntry, preimage: &[u8]) -> Result<(), HtlcError> {
    if preimage.len() > usize::from(entry.key_max_size) {
        return Err(HtlcError::InvalidPreimage);
    }
    Ok(())
}

/// Invariant: preimage hashes to the lock under the entry's own hash type.
pub fn invariant_preimage_matches(entry: &HtlcEntry, preimage: &[u8]) -> Result<(), HtlcError> {
    if !hash_verifier::verify(entry.hash_type, preimage, &entry.hash_lock) {
        return Err(HtlcError::InvalidPreimage);
    }
    Ok(())
}
