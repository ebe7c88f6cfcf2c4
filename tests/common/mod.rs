//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use elk_logging_app::http::{AppState, HttpServer};
use elk_logging_app::observability::{
    HttpSink, LogRecord, LoggerGuard, MemorySink, ServiceIdentity, StructuredLogger,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Address nothing listens on.
#[allow(dead_code)]
pub const UNREACHABLE_COLLECTOR: &str = "http://127.0.0.1:1/";

pub fn identity() -> ServiceIdentity {
    ServiceIdentity::new("user-service", "elk-logging-app")
}

/// In-process app whose records land in a `MemorySink`.
pub struct TestApp {
    pub router: Router,
    #[allow(dead_code)]
    pub logger: Arc<StructuredLogger>,
    pub guard: LoggerGuard,
    pub records: MemorySink,
}

impl TestApp {
    pub fn new() -> Self {
        let records = MemorySink::new();
        let (logger, guard) = StructuredLogger::builder(identity())
            .sink(records.clone())
            .build();
        Self::from_parts(logger, guard, records)
    }

    /// Same, with the collector sink pointed at an unreachable address.
    #[allow(dead_code)]
    pub fn with_dead_collector() -> Self {
        let records = MemorySink::new();
        let (logger, guard) = StructuredLogger::builder(identity())
            .sink(HttpSink::new(UNREACHABLE_COLLECTOR).unwrap())
            .sink(records.clone())
            .build();
        Self::from_parts(logger, guard, records)
    }

    fn from_parts(logger: StructuredLogger, guard: LoggerGuard, records: MemorySink) -> Self {
        let logger = Arc::new(logger);
        let router = HttpServer::build_router(AppState {
            logger: logger.clone(),
        });
        Self {
            router,
            logger,
            guard,
            records,
        }
    }

    /// Send a GET through the full middleware stack.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let correlation_id = response
            .headers()
            .get("x-correlation-id")
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            correlation_id,
            body,
        }
    }

    /// Flush the sinks and return every record delivered.
    pub async fn finish(self) -> Vec<LogRecord> {
        self.guard.shutdown().await;
        self.records.records()
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub correlation_id: Option<String>,
    pub body: Value,
}

impl TestResponse {
    pub fn correlation_id(&self) -> &str {
        self.correlation_id
            .as_deref()
            .expect("response is missing X-Correlation-ID")
    }
}

/// Records tied to one correlation ID, in logged order.
#[allow(dead_code)]
pub fn records_for<'a>(records: &'a [LogRecord], correlation_id: &str) -> Vec<&'a LogRecord> {
    records
        .iter()
        .filter(|r| r.correlation_id.as_deref() == Some(correlation_id))
        .collect()
}

/// Start a mock collector on an ephemeral port.
///
/// Every JSON document POSTed to `/` is forwarded on the returned channel.
/// `GET /` answers 200 so the prober has something to hit.
#[allow(dead_code)]
pub async fn start_mock_collector() -> (SocketAddr, mpsc::UnboundedReceiver<Value>) {
    let (tx, rx) = mpsc::unbounded_channel();

    async fn ingest(
        State(tx): State<mpsc::UnboundedSender<Value>>,
        Json(record): Json<Value>,
    ) -> StatusCode {
        let _ = tx.send(record);
        StatusCode::OK
    }

    let app = Router::new()
        .route("/", post(ingest).get(|| async { "ok" }))
        .with_state(tx);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, rx)
}

/// Start a collector that answers every request with `status`.
#[allow(dead_code)]
pub async fn start_status_collector(status: StatusCode) -> SocketAddr {
    let app = Router::new().fallback(move || async move { status });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}

/// Start a collector that counts `GET /` requests and answers 200.
#[allow(dead_code)]
pub async fn start_counting_collector() -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route(
            "/",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "ok"
            }),
        )
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, hits)
}
