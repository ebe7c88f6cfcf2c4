//! Diagnostic output.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber used for process diagnostics
//!   (sink failures, probe results, lifecycle events)
//!
//! # Design Decisions
//! - Diagnostics go to stderr; stdout belongs to the console sink's JSON lines
//! - `RUST_LOG` overrides the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Default filter directive for the configured level.
pub fn default_directive(config: &ObservabilityConfig) -> String {
    let level = config.log_level.to_ascii_lowercase();
    format!("elk_logging_app={level},tower_http={level}")
}

/// Install the global diagnostic subscriber. Later calls are no-ops.
pub fn init_diagnostics(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
