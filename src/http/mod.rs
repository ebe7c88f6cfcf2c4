//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, TraceLayer)
//!     → middleware/pipeline.rs
//!         → request.rs (assign correlation ID)
//!         → handlers.rs (route dispatch)
//!         → error.rs (centralized 500 on handler failure)
//!         → response.rs (correlation header, "Response sent" record)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use error::{ErrorType, HandlerError};
pub use request::{CorrelationId, CorrelationIdExt, X_CORRELATION_ID};
pub use server::{AppState, HttpServer};
