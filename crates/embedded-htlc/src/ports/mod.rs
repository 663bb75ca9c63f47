//! # Ports Module
//!
//! Hexagonal architecture ports (inbound query API, outbound ledger dependencies).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
