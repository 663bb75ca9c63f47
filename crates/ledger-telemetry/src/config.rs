//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for structured logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter directive (trace, debug, info, or a full
    /// `EnvFilter` directive such as `embedded_htlc=debug,info`)
    pub log_level: String,

    /// Whether to write logs to stdout at all
    pub console_output: bool,

    /// Whether to format logs as JSON
    pub json_logs: bool,

    /// Network identifier (testnet, mainnet, devnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "momentum-ledger".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "testnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LEDGER_SERVICE_NAME`: Service name (default: momentum-ledger)
    /// - `LEDGER_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `LEDGER_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `LEDGER_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `LEDGER_NETWORK`: Network name (default: testnet)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            service_name: lookup("LEDGER_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("LEDGER_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("LEDGER_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: lookup("LEDGER_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            network: lookup("LEDGER_NETWORK").unwrap_or(defaults.network),
        }
    }
}
