//! # Domain Errors
//!
//! Outcomes of an HTLC call.
//!
//! Rejections (`is_fatal() == false`) are the normal answer to a bad call:
//! the call's writes are discarded and the caller may resubmit. Fatal
//! errors mean the contract's own state or code broke an invariant and
//! the state transition must abort; they are never reported as a
//! rejection such as `EntryNotFound`.

use crate::abi::AbiError;
use shared_storage::StorageError;
use shared_types::Hash;
use thiserror::Error;

/// HTLC error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HtlcError {
    // =========================================================================
    // REJECTIONS
    // =========================================================================
    /// Call data could not be unpacked, or is not in canonical form.
    #[error("invalid call encoding: {reason}")]
    InvalidCallEncoding {
        /// What was wrong with the payload.
        reason: String,
    },

    /// Unknown hash type tag.
    #[error("invalid hash type {0}")]
    InvalidHashType(u8),

    /// Hash lock has the wrong length for its hash type.
    #[error("invalid hash digest length: expected {expected}, got {got}")]
    InvalidHashDigestLength {
        /// Digest size of the hash type.
        expected: usize,
        /// Length of the supplied hash lock.
        got: usize,
    },

    /// Zero-value create, or value attached to a control call.
    #[error("invalid token or amount")]
    InvalidTokenOrAmount,

    /// Expiration is not strictly after the current momentum.
    #[error("invalid expiration time {expiration_time}: current time is {now}")]
    InvalidExpirationTime {
        /// Requested expiration.
        expiration_time: i64,
        /// Current momentum timestamp.
        now: i64,
    },

    /// No live entry has this id.
    #[error("data non existent: {0}")]
    EntryNotFound(Hash),

    /// Caller is not allowed to perform this action.
    #[error("permission denied")]
    PermissionDenied,

    /// Reclaim before expiration.
    #[error("reclaim not due: entry expires at {expiration_time}, current time is {now}")]
    ReclaimNotDue {
        /// Entry expiration.
        expiration_time: i64,
        /// Current momentum timestamp.
        now: i64,
    },

    /// Unlock after expiration.
    #[error("expired: entry expired at {expiration_time}, current time is {now}")]
    Expired {
        /// Entry expiration.
        expiration_time: i64,
        /// Current momentum timestamp.
        now: i64,
    },

    /// Preimage too long, or hashes to the wrong value.
    #[error("invalid preimage")]
    InvalidPreimage,

    /// The HTLC spork is not active on this chain.
    #[error("htlc contract not active: spork not enforced")]
    FeatureNotEnforced,

    /// Call data does not select any HTLC method.
    #[error("unknown method selector {selector}")]
    UnknownMethod {
        /// Hex selector.
        selector: String,
    },

    /// Query page is larger than the configured maximum.
    #[error("page size {requested} exceeds maximum {max}")]
    PageSizeTooBig {
        /// Requested page size.
        requested: u32,
        /// Configured maximum.
        max: u32,
    },

    // =========================================================================
    // FATAL
    // =========================================================================
    /// Underlying store failed.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    /// Persisted contract data does not decode.
    #[error("corrupted entry: {reason}")]
    CorruptedEntry {
        /// What failed to decode.
        reason: String,
    },

    /// The contract failed on data it produced itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HtlcError {
    /// Returns true if the state transition must abort instead of
    /// rejecting the call.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::CorruptedEntry { .. } | Self::Internal(_)
        )
    }

    /// Map a codec failure on caller-supplied call data.
    pub fn call_encoding(err: AbiError) -> Self {
        Self::InvalidCallEncoding {
            reason: err.to_string(),
        }
    }

    /// Map a codec failure on persisted data.
    pub fn corrupted(err: impl std::fmt::Display) -> Self {
        Self::CorruptedEntry {
            reason: err.to_string(),
        }
    }

    /// Map a codec failure while packing values the contract built.
    pub fn internal(err: AbiError) -> Self {
        Self::Internal(err.to_string())
    }
}
