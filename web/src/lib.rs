//! # Eventdesk Web
//!
//! HTTP surface for Eventdesk ticket codes, built on Axum.
//!
//! Handlers stay thin: extract the request, call into `eventdesk-core`, map
//! the outcome to JSON. Domain errors become [`AppError`] responses with a
//! stable `code` string clients can branch on.
//!
//! # Example
//!
//! ```ignore
//! use eventdesk_web::{config::Config, routes::build_router, AppState};
//!
//! let config = Config::from_env();
//! let app = build_router(AppState::from_config(&config));
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{AppJson, CorrelationId};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use routes::build_router;
pub use state::AppState;
