//! Axum middleware for request tracking and observability.
//!
//! Every request gets a correlation ID: the client's `X-Correlation-ID` if it
//! is a valid UUID, a fresh UUID v4 otherwise. The ID is stored in request
//! extensions as a [`CorrelationId`], recorded on an `http_request` tracing
//! span wrapping the handler, and echoed in the response header.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use eventdesk_web::middleware::correlation_id_layer;
//!
//! let app = Router::new()
//!     .route("/api/tickets/codes", post(issue_code))
//!     .layer(correlation_id_layer());
//! ```

use crate::extractors::CorrelationId;
use axum::{extract::Request, http::HeaderValue, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Create a layer that adds correlation ID tracking to all requests.
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Copy, Debug)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Middleware service for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id = correlation_id_of(&req);
        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            uri = %req.uri(),
        );
        let fut = self.inner.call(req).instrument(span);

        Box::pin(async move {
            let mut response = fut.await?;
            echo_correlation_id(&mut response, correlation_id);
            Ok(response)
        })
    }
}

/// The client's correlation ID if it sent a valid one, otherwise a new one.
fn correlation_id_of(req: &Request) -> CorrelationId {
    req.headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(CorrelationId::from_header_value)
        .unwrap_or_else(CorrelationId::generate)
}

fn echo_correlation_id(response: &mut Response, correlation_id: CorrelationId) {
    // A hyphenated UUID is always a valid header value
    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
}
