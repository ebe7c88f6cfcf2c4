//! Route handlers.
//!
//! All handlers are stateless apart from the shared logger and read the
//! correlation ID assigned by the pipeline.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Map, Value};

use crate::http::error::{ErrorType, HandlerError};
use crate::http::request::CorrelationId;
use crate::http::server::AppState;

/// `GET /`
pub async fn root(correlation_id: CorrelationId) -> Json<Value> {
    Json(json!({
        "hello": "world",
        "correlationId": correlation_id,
    }))
}

/// `GET /error`: always fails; the category is only reported in the log.
pub async fn induced_error(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
) -> Result<Json<Value>, HandlerError> {
    let error_type = ErrorType::random();
    let error = HandlerError::Induced(error_type);

    state.logger.error(
        "An error occurred",
        json!({
            "path": "/error",
            "correlationId": correlation_id,
            "errorType": error_type.label(),
            "errorMessage": error.to_string(),
        }),
    );

    Err(error)
}

/// `GET /echo`
pub async fn echo(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Value> {
    let params = group_query_pairs(pairs);

    // Stringified so the collector does not map every query key as a field.
    let serialized = serde_json::to_string(&params).unwrap_or_default();
    state.logger.info(
        "Echo request received",
        json!({
            "params": serialized,
            "correlationId": correlation_id,
        }),
    );

    Json(json!({
        "echo": params,
        "correlationId": correlation_id,
    }))
}

/// Fold query pairs into an object. A key seen once maps to its string
/// value; a repeated key maps to an array of its values in query order.
fn group_query_pairs(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut params = Map::new();
    for (key, value) in pairs {
        match params.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                params.insert(key, Value::String(value));
            }
        }
    }
    params
}

/// `GET /bad-request`: a plain 400, not routed through the error handler.
pub async fn bad_request(correlation_id: CorrelationId) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Bad Request",
            "correlationId": correlation_id,
        })),
    )
}
