//! Custom Axum extractors and request-scoped values.

use crate::error::AppError;
use axum::extract::FromRequest;
use std::fmt;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Inserted into request extensions by
/// [`correlation_id_layer`](crate::middleware::correlation_id_layer);
/// handlers that need it take `Extension<CorrelationId>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

impl CorrelationId {
    /// Read a correlation ID from a header value, if it is a valid UUID.
    #[must_use]
    pub fn from_header_value(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }

    /// A fresh random correlation ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// JSON body extractor whose rejections are [`AppError`] responses.
///
/// Behaves like `axum::Json`, except that a missing content type, a syntax
/// error or a body that does not match `T` produces the usual
/// `{code, message}` error body instead of plain text.
///
/// # Example
///
/// ```ignore
/// async fn handler(AppJson(request): AppJson<ValidateCodeRequest>) -> impl IntoResponse {
///     request.code
/// }
/// ```
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
