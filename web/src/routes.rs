//! Router configuration.

use crate::handlers::{health::health_check, tickets};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `GET /health` (liveness)
/// - `POST /api/tickets/codes`
/// - `GET /api/tickets/codes/:code`
/// - `POST /api/tickets/validate`
///
/// Every route is wrapped in HTTP tracing and correlation ID tracking.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/tickets/codes", post(tickets::issue_code))
        .route("/tickets/codes/:code", get(tickets::get_code))
        .route("/tickets/validate", post(tickets::validate_code));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}
