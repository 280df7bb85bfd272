//! # Eventdesk Core
//!
//! Domain utilities for the Eventdesk event platform.
//!
//! This crate provides:
//! - **Ticket codes**: generation and validation of `TKT-XXXXXX` identifiers
//! - **Issuance**: registry-backed uniqueness with bounded retry
//! - **Verification tokens**: random URL-safe secrets with expiry checks
//! - **Mail**: the seam to the transactional email provider
//! - **Environment**: injectable clock
//!
//! Everything here is free of HTTP concerns; the `eventdesk-web` crate wires
//! it into request handlers.
//!
//! ## Example
//!
//! ```
//! use eventdesk_core::issuance::{InMemoryTicketCodeRegistry, TicketCodeIssuer};
//! use eventdesk_core::ticket_code;
//!
//! # tokio_test::block_on(async {
//! let issuer = TicketCodeIssuer::new(InMemoryTicketCodeRegistry::new());
//! let code = issuer.issue().await.unwrap();
//! assert!(ticket_code::is_valid(code.as_str()));
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod environment;
pub mod issuance;
pub mod mail;
pub mod ticket_code;
pub mod token;

// Re-export key types for convenience
pub use issuance::{IssueError, RegistryError, TicketCodeIssuer, TicketCodeRegistry};
pub use mail::{MailError, TicketMailer};
pub use ticket_code::{TicketCode, TicketCodeError};
pub use token::VerificationToken;
