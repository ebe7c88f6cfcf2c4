//! Structured log record.
//!
//! Records use an ECS-flavoured layout so the collector can index them
//! without a custom mapping:
//!
//! ```text
//! {
//!   "@timestamp": "2026-01-01T00:00:00.000Z",
//!   "log.level": "info",
//!   "message": "Response sent",
//!   "service": "user-service",
//!   "application": "elk-logging-app",
//!   "correlationId": "5b0e…",
//!   "metadata": { "method": "GET", "path": "/", "statusCode": 200 }
//! }
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name that carries the correlation identifier.
pub const CORRELATION_FIELD: &str = "correlationId";

/// Severity of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed identity tags stamped on every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub service: String,
    pub application: String,
}

impl ServiceIdentity {
    pub fn new(service: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            application: application.into(),
        }
    }
}

/// A single immutable log event, handed to every sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "log.level")]
    pub level: Level,

    pub message: String,

    pub service: String,

    pub application: String,

    /// Present on every record produced while handling a request.
    #[serde(
        rename = "correlationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub correlation_id: Option<String>,

    /// Event-specific fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl LogRecord {
    /// Build a record stamped with the current time.
    ///
    /// `fields` is normally a JSON object; its `correlationId` entry, if any,
    /// is lifted into the dedicated field. Any other JSON value is kept
    /// under `metadata.data`.
    pub fn new(
        level: Level,
        message: impl Into<String>,
        identity: &ServiceIdentity,
        fields: Value,
    ) -> Self {
        let mut metadata = match fields {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        let correlation_id = match metadata.remove(CORRELATION_FIELD) {
            Some(Value::String(id)) => Some(id),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            service: identity.service.clone(),
            application: identity.application.clone(),
            correlation_id,
            metadata,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.metadata.get(name)
    }
}
