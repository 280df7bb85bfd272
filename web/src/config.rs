//! Configuration management for the Eventdesk service.
//!
//! Loads configuration from environment variables with sensible defaults.

use eventdesk_core::issuance::DEFAULT_MAX_ATTEMPTS;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Ticket code issuance configuration
    pub tickets: TicketConfig,
    /// Transactional mail configuration
    pub mail: MailConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

/// Ticket code issuance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketConfig {
    /// Draws per issuance before giving up on collisions (minimum 1)
    pub max_issue_attempts: u32,
}

/// Transactional mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Event name used in confirmation mails when the request names none
    pub default_event_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_level: "eventdesk=info,tower_http=debug".to_string(),
            },
            tickets: TicketConfig {
                max_issue_attempts: DEFAULT_MAX_ATTEMPTS,
            },
            mail: MailConfig {
                default_event_name: "Eventdesk".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to [`Config::default`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Used by [`Config::from_env`]; tests pass a map instead of mutating the
    /// process environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or(defaults.server.host),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.server.port),
                log_level: lookup("RUST_LOG").unwrap_or(defaults.server.log_level),
            },
            tickets: TicketConfig {
                max_issue_attempts: lookup("TICKET_CODE_MAX_ATTEMPTS")
                    .and_then(|s| s.parse().ok())
                    .map_or(defaults.tickets.max_issue_attempts, |n: u32| n.max(1)),
            },
            mail: MailConfig {
                default_event_name: lookup("MAIL_EVENT_NAME")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(defaults.mail.default_event_name),
            },
        }
    }

    /// Address the HTTP server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
