//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request pipeline and handlers produce:
//!     → logger.rs (StructuredLogger::log)
//!     → record.rs (LogRecord, ECS-flavoured JSON)
//!     → sink.rs (console JSON lines, collector HTTP POST)
//!
//! Everything else (sink failures, probe results, lifecycle):
//!     → logging.rs (`tracing` diagnostics on stderr)
//! ```
//!
//! # Design Decisions
//! - Two channels: structured records are the product, diagnostics are not
//! - Correlation ID flows into every request-scoped record
//! - Sink failures are reported as diagnostics, never as records

pub mod logger;
pub mod logging;
pub mod record;
pub mod sink;

pub use logger::{LoggerBuilder, LoggerGuard, StructuredLogger};
pub use record::{Level, LogRecord, ServiceIdentity, CORRELATION_FIELD};
pub use sink::{ConsoleSink, HttpSink, MemorySink, Sink, SinkError};
