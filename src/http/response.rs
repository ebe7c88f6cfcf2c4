//! Response finalization.
//!
//! # Responsibilities
//! - Set the `X-Correlation-ID` header on the outgoing response
//! - Emit the single "Response sent" record before the response is handed
//!   back to the transport
//!
//! # Design Decisions
//! - Runs after the handler (or the error handler) has produced the final
//!   status, so the logged status is the one the client sees
//! - Existing header values are replaced, never appended

use axum::{http::Method, response::Response};
use serde_json::json;

use crate::http::request::{CorrelationId, X_CORRELATION_ID};
use crate::observability::StructuredLogger;

/// Attach the correlation header and log the response.
pub fn finalize(
    logger: &StructuredLogger,
    correlation_id: &CorrelationId,
    method: &Method,
    path: &str,
    mut response: Response,
) -> Response {
    match correlation_id.to_header_value() {
        Ok(value) => {
            response.headers_mut().insert(X_CORRELATION_ID, value);
        }
        Err(e) => {
            tracing::warn!(correlation_id = %correlation_id, error = %e, "Correlation ID is not a valid header value");
        }
    }

    logger.info(
        "Response sent",
        json!({
            "method": method.as_str(),
            "path": path,
            "statusCode": response.status().as_u16(),
            "correlationId": correlation_id,
        }),
    );

    response
}
