//! # Ledger Telemetry
//!
//! Structured logging bootstrap for the Momentum ledger.
//!
//! Library crates only emit `tracing` events; binaries and test harnesses
//! call into this crate once to decide where those events go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LEDGER_SERVICE_NAME` | `momentum-ledger` | Service name in log lines |
//! | `LEDGER_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `LEDGER_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `LEDGER_JSON_LOGS` | `false` | JSON formatted logs |
//! | `LEDGER_NETWORK` | `testnet` | Network name |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_test_tracing, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("tracing subscriber already initialized: {0}")]
    AlreadyInitialized(String),

    /// Configuration could not be turned into a subscriber.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize structured logging.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active. Logs shutdown when dropped.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

/// Convenience macro for opening a span scoped to one embedded contract.
///
/// # Example
///
/// ```rust,ignore
/// use ledger_telemetry::contract_span;
///
/// let _span = contract_span!("receive", contract = "htlc", method = "UnlockHtlc").entered();
/// ```
#[macro_export]
macro_rules! contract_span {
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
