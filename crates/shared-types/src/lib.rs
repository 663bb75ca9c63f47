//! # Shared Types Crate
//!
//! Ledger primitives shared by the storage layer, the telemetry bootstrap
//! and every embedded contract.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers and blocks are defined once here.
//! - **Newtypes over raw arrays**: `Hash`, `Address` and `TokenStandard`
//!   cannot be confused with each other at a call site.
//! - **Hex on the wire**: every identifier serializes as a `0x`-prefixed
//!   hex string.

#![warn(missing_docs)]

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
