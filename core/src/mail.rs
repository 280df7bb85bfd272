//! Transactional mail.
//!
//! The mail vendor is reached through [`TicketMailer`]. The console
//! implementation writes messages to the log for development; production
//! deployments supply an implementation backed by their provider's SDK.

use crate::ticket_code::TicketCode;
use std::future::Future;
use thiserror::Error;
use tracing::info;

/// Mail delivery failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailError {
    /// The recipient address is not usable.
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    /// The provider refused or failed to deliver the message.
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Sends ticket-related mail to ticket holders.
pub trait TicketMailer: Send + Sync {
    /// Send the issued ticket code to its holder.
    ///
    /// # Arguments
    ///
    /// - `to`: Recipient email address
    /// - `code`: Issued ticket code
    /// - `event_name`: Event the ticket admits to
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The recipient address is invalid
    /// - The provider rejects the message
    fn send_ticket_code(
        &self,
        to: &str,
        code: &TicketCode,
        event_name: &str,
    ) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// Logs mail instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTicketMailer;

impl ConsoleTicketMailer {
    /// Create a console mailer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TicketMailer for ConsoleTicketMailer {
    async fn send_ticket_code(
        &self,
        to: &str,
        code: &TicketCode,
        event_name: &str,
    ) -> Result<(), MailError> {
        validate_recipient(to)?;

        info!(
            to = %to,
            code = %code,
            event = %event_name,
            "\n\n\
            ┌────────────────────────────────────────────────────────────────┐\n\
            │                      Your Ticket                               │\n\
            ├────────────────────────────────────────────────────────────────┤\n\
            │ To: {:<58} │\n\
            │ Event: {:<55} │\n\
            │                                                                │\n\
            │ Ticket code: {:<49} │\n\
            │                                                                │\n\
            │ Show this code or its QR image at the entrance.                │\n\
            └────────────────────────────────────────────────────────────────┘\n",
            to, event_name, code.as_str()
        );

        Ok(())
    }
}

/// Minimal recipient check: one `@` with something on both sides.
///
/// # Errors
///
/// Returns [`MailError::InvalidRecipient`] if the address is malformed.
pub fn validate_recipient(to: &str) -> Result<(), MailError> {
    match to.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(MailError::InvalidRecipient(to.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_recipient() {
        assert!(validate_recipient("holder@example.com").is_ok());
        assert!(validate_recipient("").is_err());
        assert!(validate_recipient("holder").is_err());
        assert!(validate_recipient("@example.com").is_err());
        assert!(validate_recipient("holder@").is_err());
        assert!(validate_recipient("a@b@c").is_err());
    }

    #[tokio::test]
    async fn test_console_mailer_sends() {
        let code = TicketCode::parse("TKT-ABC123").unwrap();
        let result = ConsoleTicketMailer::new()
            .send_ticket_code("holder@example.com", &code, "Launch Night")
            .await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_console_mailer_rejects_bad_recipient() {
        let code = TicketCode::parse("TKT-ABC123").unwrap();
        let result = ConsoleTicketMailer::new()
            .send_ticket_code("not-an-address", &code, "Launch Night")
            .await;
        assert_eq!(
            result,
            Err(MailError::InvalidRecipient("not-an-address".to_string()))
        );
    }
}
