//! Application state for Axum handlers.

use crate::config::Config;
use eventdesk_core::issuance::{InMemoryTicketCodeRegistry, TicketCodeIssuer};
use eventdesk_core::mail::ConsoleTicketMailer;
use std::sync::Arc;

/// Issuer type used by the service.
pub type Issuer = TicketCodeIssuer<InMemoryTicketCodeRegistry>;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ticket code issuer and its registry
    pub issuer: Arc<Issuer>,
    /// Mailer for ticket confirmations
    pub mailer: ConsoleTicketMailer,
    /// Event name for confirmations whose request names none
    pub default_event_name: Arc<str>,
}

impl AppState {
    /// Create application state from its parts.
    #[must_use]
    pub fn new(
        issuer: Issuer,
        mailer: ConsoleTicketMailer,
        default_event_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            issuer: Arc::new(issuer),
            mailer,
            default_event_name: default_event_name.into(),
        }
    }

    /// Build state with an empty in-memory registry, as configured.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let issuer = TicketCodeIssuer::new(InMemoryTicketCodeRegistry::new())
            .with_max_attempts(config.tickets.max_issue_attempts);

        Self::new(
            issuer,
            ConsoleTicketMailer::new(),
            config.mail.default_event_name.as_str(),
        )
    }
}
