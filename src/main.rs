//! ELK logging demo service.
//!
//! # Architecture Overview
//!
//! ```text
//! Client request
//!     → request pipeline (assign correlation ID)
//!     → route handler ─── error? ──▶ centralized error handler (500)
//!     → correlation header + "Response sent" record
//!     → Client response
//!
//! Every record:
//!     StructuredLogger → stdout (JSON lines)
//!                      → collector (HTTP POST, best effort)
//!
//! Background:
//!     CollectorProber → GET collector every 5s → stderr diagnostics
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use elk_logging_app::config::{self, AppConfig, ConfigError};
use elk_logging_app::health::CollectorProber;
use elk_logging_app::lifecycle::{wait_for_signal, Shutdown};
use elk_logging_app::observability::logging::init_diagnostics;
use elk_logging_app::{HttpServer, StructuredLogger};

#[derive(Parser)]
#[command(name = "elk-logging-app")]
#[command(about = "Demo HTTP service that ships correlated structured logs", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:3000).
    #[arg(short, long)]
    bind: Option<String>,
}

fn load(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
        config::validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    init_diagnostics(&config.observability);

    tracing::info!("elk-logging-app v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        collector = %config.collector.url(),
        probe_enabled = config.probe.enabled,
        "Configuration loaded"
    );

    let (logger, logger_guard) = StructuredLogger::from_config(&config)?;
    let logger = Arc::new(logger);

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();

    if config.probe.enabled {
        let prober = CollectorProber::new(&config.collector, &config.probe);
        tokio::spawn(prober.run(shutdown.subscribe()));
    }

    let server = HttpServer::new(logger);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    logger_guard.shutdown().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
