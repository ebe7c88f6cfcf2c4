//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Defaults reproduce the stock deployment (app on :3000, collector at
//! `logstash:5000`).

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Identity tags stamped on every log record.
    pub service: ServiceConfig,

    /// Remote log collector (sink target and probe target).
    pub collector: CollectorConfig,

    /// Console sink settings.
    pub console: ConsoleConfig,

    /// Collector liveness probe settings.
    pub probe: ProbeConfig,

    /// Diagnostic output settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Service identity metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name (`service` field of every record).
    pub name: String,

    /// Application name (`application` field of every record).
    pub application: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "user-service".to_string(),
            application: "elk-logging-app".to_string(),
        }
    }
}

/// Remote log collector endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Ship records to the collector.
    pub enabled: bool,

    /// Collector host name.
    pub host: String,

    /// Collector port.
    pub port: u16,

    /// Path records are posted to.
    pub path: String,
}

impl CollectorConfig {
    /// Base URL of the collector, without a path.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Full URL records are posted to.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url(), self.path)
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "logstash".to_string(),
            port: 5000,
            path: "/".to_string(),
        }
    }
}

/// Console (stdout) sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Write records to stdout as JSON lines.
    pub enabled: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Collector liveness probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Enable the periodic probe.
    pub enabled: bool,

    /// Probe interval in seconds.
    pub interval_secs: u64,

    /// Path to probe on the collector.
    pub path: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 5,
            path: "/".to_string(),
        }
    }
}

/// Diagnostic output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Diagnostic log level (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
