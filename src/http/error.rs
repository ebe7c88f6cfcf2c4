//! Handler errors and the centralized error handler.
//!
//! # Data Flow
//! ```text
//! handler returns Err(HandlerError)
//!     → IntoResponse: bare 500 tagged with a HandlerFailure extension
//!     → request pipeline sees the tag
//!     → handle_error: log "Error caught in middleware", generic 500 body
//! ```
//!
//! # Design Decisions
//! - Every handler failure becomes the same 500 payload; the message is
//!   logged and never sent to the client
//! - The error handler lives in the pipeline because that is where the
//!   logger and the correlation ID are

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rand::Rng;
use serde_json::json;
use thiserror::Error;

use crate::http::request::CorrelationId;
use crate::observability::StructuredLogger;

/// Simulated failure categories for the `/error` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    Validation,
    Authentication,
    Database,
    Network,
}

impl ErrorType {
    pub const ALL: [ErrorType; 4] = [
        ErrorType::Validation,
        ErrorType::Authentication,
        ErrorType::Database,
        ErrorType::Network,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ErrorType::Validation => "ValidationError",
            ErrorType::Authentication => "AuthenticationError",
            ErrorType::Database => "DatabaseError",
            ErrorType::Network => "NetworkError",
        }
    }

    /// Uniformly random category.
    pub fn random() -> Self {
        let index = rand::thread_rng().gen_range(0..Self::ALL.len());
        Self::ALL[index]
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors a route handler can propagate into the pipeline.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Deliberately induced failure.
    #[error("This is a test {0}")]
    Induced(ErrorType),
}

/// Marker left on a response by a failed handler.
#[derive(Debug, Clone)]
pub struct HandlerFailure {
    pub message: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(HandlerFailure {
            message: self.to_string(),
        });
        response
    }
}

/// Centralized error handler. Always answers 500 with a generic payload.
pub fn handle_error(
    logger: &StructuredLogger,
    correlation_id: &CorrelationId,
    failure: &HandlerFailure,
) -> Response {
    logger.error(
        "Error caught in middleware",
        json!({
            "error": failure.message,
            "correlationId": correlation_id,
        }),
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal Server Error",
            "correlationId": correlation_id,
        })),
    )
        .into_response()
}
