//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, ports valid)
//! - Validate addresses and paths before anything binds or connects
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check the configuration, collecting every error.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.server.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("invalid socket address {:?}: {}", config.server.bind_address, e),
        ));
    }

    if config.service.name.trim().is_empty() {
        errors.push(ValidationError::new("service.name", "must not be empty"));
    }
    if config.service.application.trim().is_empty() {
        errors.push(ValidationError::new("service.application", "must not be empty"));
    }

    // Collector address is shared by the sink and the probe.
    if config.collector.enabled || config.probe.enabled {
        if config.collector.host.trim().is_empty() {
            errors.push(ValidationError::new("collector.host", "must not be empty"));
        }
        if config.collector.port == 0 {
            errors.push(ValidationError::new("collector.port", "must be non-zero"));
        }
    }
    if !config.collector.path.starts_with('/') {
        errors.push(ValidationError::new("collector.path", "must start with '/'"));
    }

    if config.probe.interval_secs == 0 {
        errors.push(ValidationError::new("probe.interval_secs", "must be greater than zero"));
    }
    if !config.probe.path.starts_with('/') {
        errors.push(ValidationError::new("probe.path", "must start with '/'"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level {:?}", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
