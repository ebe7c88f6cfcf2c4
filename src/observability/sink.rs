//! Log sinks.
//!
//! # Responsibilities
//! - Accept one record at a time and deliver it to a destination
//! - Report failure as a `SinkError`; the caller decides what to do with it
//!
//! # Design Decisions
//! - Each sink is owned by a single worker task, so `deliver` takes `&mut self`
//!   and per-sink ordering falls out of sequential delivery
//! - No retries, no batching

use std::future::Future;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};

use crate::observability::record::LogRecord;

/// Errors raised while delivering a record.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collector answered with a non-success status.
    #[error("collector rejected record with status {0}")]
    Rejected(reqwest::StatusCode),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A destination for structured log records.
pub trait Sink: Send + 'static {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Deliver one record.
    fn deliver(&mut self, record: &LogRecord)
        -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Writes each record as one JSON line.
pub struct ConsoleSink<W = Stdout> {
    writer: W,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            writer: tokio::io::stdout(),
        }
    }
}

impl<W> ConsoleSink<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> Sink for ConsoleSink<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    fn name(&self) -> &'static str {
        "console"
    }

    async fn deliver(&mut self, record: &LogRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Posts each record as a JSON document to the remote collector.
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Sink for HttpSink {
    fn name(&self) -> &'static str {
        "collector"
    }

    async fn deliver(&mut self, record: &LogRecord) -> Result<(), SinkError> {
        let response = self.client.post(&self.endpoint).json(record).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected(status));
        }
        Ok(())
    }
}

/// Keeps every record in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records delivered so far, in delivery order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn deliver(&mut self, record: &LogRecord) -> Result<(), SinkError> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
        Ok(())
    }
}
