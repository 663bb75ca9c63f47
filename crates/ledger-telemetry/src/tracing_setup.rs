//! Global `tracing` subscriber setup.
//!
//! Installs an `EnvFilter` plus either a pretty or a JSON formatting layer.
//! Installation goes through `try_init`, so a second call reports
//! [`TelemetryError::AlreadyInitialized`] rather than panicking.

use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::{TelemetryConfig, TelemetryError};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn env_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(level).map_err(|e| TelemetryError::Config(e.to_string()))
}

fn fmt_layer(config: &TelemetryConfig) -> Option<BoxedLayer> {
    if !config.console_output {
        return None;
    }

    let layer = if config.json_logs {
        // JSON output for containers/production
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        // Pretty output for development
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true)
            .boxed()
    };
    Some(layer)
}

/// Install the global subscriber described by `config`.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(&config.log_level)?;

    tracing_subscriber::registry()
        .with(fmt_layer(config))
        .with(filter)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        network = %config.network,
        json_logs = config.json_logs,
        "tracing initialized"
    );

    Ok(())
}

/// Install a subscriber that writes through the test harness capture.
///
/// Honours `RUST_LOG`, defaulting to `debug`. Safe to call from every
/// test: only the first call installs anything.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
