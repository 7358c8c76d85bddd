//! inkstone-common: shared contracts for the inkstone editor crates.
//!
//! This crate provides:
//! - `Toast`/`Notifier` - the transient-notification contract
//! - `EditorConfig` - editor tuning knobs with serde support
//! - `telemetry` - console tracing setup for bins and tests

pub mod config;
pub mod telemetry;
pub mod toast;

pub use config::EditorConfig;
pub use toast::{MemoryNotifier, Notifier, Toast, ToastLevel};
