//! Structured logger with pluggable sinks.
//!
//! # Data Flow
//! ```text
//! log(level, message, fields)
//!     → LogRecord (identity + fields + timestamp)
//!     → one unbounded channel per sink (non-blocking send)
//!     → sink worker task delivers records in order
//!     → delivery errors reported via `tracing`, then dropped
//! ```
//!
//! # Design Decisions
//! - `log` never awaits and never fails; callers on the request path are
//!   never held up by a sink
//! - One worker per sink: a dead collector cannot stall the console
//! - Failures go to the diagnostic channel, never back through this logger
//! - `LoggerGuard::shutdown` is the flush hook: it closes the channels,
//!   drains what was already queued and joins the workers

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::observability::record::{Level, LogRecord, ServiceIdentity};
use crate::observability::sink::{ConsoleSink, HttpSink, Sink, SinkError};

type RecordTx = mpsc::UnboundedSender<Arc<LogRecord>>;
type RecordRx = mpsc::UnboundedReceiver<Arc<LogRecord>>;

/// Process-wide structured logger.
///
/// Built once at startup and shared behind an `Arc`.
pub struct StructuredLogger {
    identity: ServiceIdentity,
    sinks: Vec<SinkHandle>,
}

struct SinkHandle {
    name: &'static str,
    tx: RecordTx,
}

impl StructuredLogger {
    pub fn builder(identity: ServiceIdentity) -> LoggerBuilder {
        LoggerBuilder {
            identity,
            sinks: Vec::new(),
            workers: Vec::new(),
        }
    }

    /// Build the logger described by the configuration.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_config(config: &AppConfig) -> Result<(Self, LoggerGuard), SinkError> {
        let identity = ServiceIdentity::new(&config.service.name, &config.service.application);
        let mut builder = Self::builder(identity);

        if config.console.enabled {
            builder = builder.sink(ConsoleSink::stdout());
        }
        if config.collector.enabled {
            let sink = HttpSink::new(config.collector.url())?;
            tracing::info!(endpoint = %sink.endpoint(), "Collector sink enabled");
            builder = builder.sink(sink);
        }

        Ok(builder.build())
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    /// Names of the configured sinks, in registration order.
    pub fn sink_names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name).collect()
    }

    /// Build a record and hand it to every sink.
    pub fn log(&self, level: Level, message: impl Into<String>, fields: Value) {
        let record = Arc::new(LogRecord::new(level, message, &self.identity, fields));

        for sink in &self.sinks {
            if sink.tx.send(Arc::clone(&record)).is_err() {
                tracing::debug!(sink = sink.name, "Sink closed, record dropped");
            }
        }
    }

    pub fn info(&self, message: impl Into<String>, fields: Value) {
        self.log(Level::Info, message, fields);
    }

    pub fn error(&self, message: impl Into<String>, fields: Value) {
        self.log(Level::Error, message, fields);
    }
}

/// Registers sinks and spawns one worker per sink.
pub struct LoggerBuilder {
    identity: ServiceIdentity,
    sinks: Vec<SinkHandle>,
    workers: Vec<Worker>,
}

impl LoggerBuilder {
    /// Add a sink. Its worker task is spawned immediately, so this must be
    /// called from within a Tokio runtime.
    pub fn sink<S: Sink>(mut self, sink: S) -> Self {
        let name = sink.name();
        let (tx, rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run_worker(sink, rx, stop_rx));

        self.sinks.push(SinkHandle { name, tx });
        self.workers.push(Worker {
            name,
            stop: stop_tx,
            task,
        });
        self
    }

    pub fn build(self) -> (StructuredLogger, LoggerGuard) {
        let logger = StructuredLogger {
            identity: self.identity,
            sinks: self.sinks,
        };
        (
            logger,
            LoggerGuard {
                workers: self.workers,
            },
        )
    }
}

struct Worker {
    name: &'static str,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Shutdown hook for the logger's sink workers.
///
/// Dropping the guard without calling [`LoggerGuard::shutdown`] also stops
/// the workers once they have drained their queues, but nothing waits for
/// them.
pub struct LoggerGuard {
    workers: Vec<Worker>,
}

impl LoggerGuard {
    /// Stop accepting records, flush queued records to every sink and wait
    /// for the workers to finish.
    pub async fn shutdown(self) {
        for worker in self.workers {
            let _ = worker.stop.send(());
            if let Err(e) = worker.task.await {
                tracing::error!(sink = worker.name, error = %e, "Sink worker panicked");
            }
        }
    }
}

async fn run_worker<S: Sink>(mut sink: S, mut rx: RecordRx, mut stop: oneshot::Receiver<()>) {
    loop {
        tokio::select! {
            biased;
            record = rx.recv() => match record {
                Some(record) => deliver(&mut sink, &record).await,
                None => break,
            },
            _ = &mut stop => {
                rx.close();
                while let Some(record) = rx.recv().await {
                    deliver(&mut sink, &record).await;
                }
                break;
            }
        }
    }
    tracing::debug!(sink = sink.name(), "Sink worker stopped");
}

async fn deliver<S: Sink>(sink: &mut S, record: &LogRecord) {
    if let Err(e) = sink.deliver(record).await {
        tracing::error!(
            sink = sink.name(),
            error = %e,
            record = %record.message,
            "Error sending log record to sink"
        );
    }
}
