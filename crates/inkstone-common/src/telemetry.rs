//! Tracing setup for bins, demos and tests.
//!
//! Console-only: an `EnvFilter` layered over the fmt subscriber. Library
//! crates emit events through `tracing` and never install a subscriber;
//! hosts call [`init`] once at startup.

use std::sync::OnceLock;

use tracing::Level;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name included in the default filter directive.
    pub service_name: String,
    /// Console log level when `RUST_LOG` is unset.
    pub console_level: Level,
}

impl TelemetryConfig {
    /// Build a config with the conventional defaults: DEBUG in debug
    /// builds, INFO otherwise. `RUST_LOG` overrides the level at runtime.
    pub fn new(service_name: impl Into<String>) -> Self {
        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };
        Self {
            service_name: service_name.into(),
            console_level,
        }
    }
}

/// Install the console subscriber. Idempotent: later calls are no-ops, so
/// tests can call this freely.
pub fn init(config: TelemetryConfig) {
    INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.console_level.to_string().to_lowercase()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();

        tracing::debug!(service = %config.service_name, "telemetry installed");
    });
}
