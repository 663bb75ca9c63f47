//! # Algorithms Module
//!
//! Digest verification and listing order for the HTLC contract.

pub mod hash_verifier;
pub mod listing;

pub use listing::{paginate, sort_entries};
