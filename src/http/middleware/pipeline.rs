//! Request pipeline middleware.
//! Correlates, dispatches, normalizes errors and logs every response.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::error::{handle_error, HandlerFailure};
use crate::http::request::CorrelationId;
use crate::http::response;
use crate::http::server::AppState;

pub async fn request_pipeline(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Assign correlation context
    let correlation_id = CorrelationId::generate();
    req.extensions_mut().insert(correlation_id.clone());

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    tracing::debug!(
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    // 2. Dispatch to handler (or the 404 fallback)
    let response = next.run(req).await;

    // 3. Centralized error handling
    let response = match response.extensions().get::<HandlerFailure>().cloned() {
        Some(failure) => handle_error(&state.logger, &correlation_id, &failure),
        None => response,
    };

    // 4. Header + "Response sent" record, then hand back to the transport
    response::finalize(&state.logger, &correlation_id, &method, &path, response)
}
