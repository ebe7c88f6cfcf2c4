//! Request correlation.
//!
//! # Responsibilities
//! - Generate a unique correlation ID (UUID v4) per inbound request
//! - Carry it in request extensions for handlers and the pipeline
//! - Provide an extractor so handlers can take `CorrelationId` directly
//!
//! # Design Decisions
//! - Always generated fresh; an inbound `X-Correlation-ID` is ignored
//! - Serializes as a plain string so it can be dropped into JSON payloads

use std::fmt;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, HeaderValue, StatusCode},
};
use serde::Serialize;
use uuid::Uuid;

/// Response header carrying the correlation ID.
pub const X_CORRELATION_ID: HeaderName = HeaderName::from_static("x-correlation-id");

/// Opaque per-request identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_header_value(&self) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
        HeaderValue::from_str(&self.0)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the correlation ID assigned by the request pipeline.
pub trait CorrelationIdExt {
    fn correlation_id(&self) -> Option<&CorrelationId>;
}

impl CorrelationIdExt for Parts {
    fn correlation_id(&self) -> Option<&CorrelationId> {
        self.extensions.get::<CorrelationId>()
    }
}

impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.correlation_id().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Correlation ID missing: request pipeline not installed",
        ))
    }
}
