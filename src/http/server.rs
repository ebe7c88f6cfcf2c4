//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request pipeline)
//! - Bind server to listener and emit the startup record
//! - Drain in-flight requests on shutdown

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::middleware::request_pipeline;
use crate::lifecycle::ShutdownSignal;
use crate::observability::StructuredLogger;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub logger: Arc<StructuredLogger>,
}

/// HTTP server for the demo service.
pub struct HttpServer {
    router: Router,
    logger: Arc<StructuredLogger>,
}

impl HttpServer {
    /// Create a new HTTP server logging through `logger`.
    pub fn new(logger: Arc<StructuredLogger>) -> Self {
        let state = AppState {
            logger: logger.clone(),
        };
        let router = Self::build_router(state);
        Self { router, logger }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request pipeline wraps the fallback too, so unmatched routes
    /// still get a correlation ID and a "Response sent" record.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/error", get(handlers::induced_error))
            .route("/echo", get(handlers::echo))
            .route("/bad-request", get(handlers::bad_request))
            .layer(middleware::from_fn_with_state(state.clone(), request_pipeline))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        self.logger.info("Server started", json!({ "port": addr.port() }));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
