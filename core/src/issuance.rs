//! Ticket code issuance.
//!
//! [`ticket_code::generate`] draws a random code but cannot know whether that
//! code is already printed on another ticket. Uniqueness is enforced here, on
//! the persistence side: the issuer reserves every candidate in a
//! [`TicketCodeRegistry`] and draws again when the reservation reports a
//! duplicate.
//!
//! There are 36^6 (about 2.2 billion) possible codes. The number of draws per
//! issuance is bounded.

use crate::ticket_code::{self, TicketCode};
use std::collections::HashSet;
use std::future::Future;
use thiserror::Error;
use tokio::sync::RwLock;

/// Default number of draws before [`TicketCodeIssuer::issue`] gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Failure reported by a [`TicketCodeRegistry`] backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The backing store could not be reached or rejected the operation.
    #[error("Ticket code registry unavailable: {0}")]
    Unavailable(String),
}

/// Failure to issue a ticket code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IssueError {
    /// Every draw collided with an existing code.
    #[error("No unique ticket code after {attempts} attempts")]
    Exhausted {
        /// Number of draws made
        attempts: u32,
    },

    /// The registry failed while reserving a code.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Store of issued ticket codes.
///
/// Implementations are expected to make `reserve` atomic: two concurrent
/// reservations of the same code must not both return `true`. A database
/// backend gets this from a unique constraint on the code column.
pub trait TicketCodeRegistry: Send + Sync {
    /// Reserve `code`.
    ///
    /// Returns `true` if the code was free and is now taken, `false` if it
    /// was already reserved.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the backing store fails.
    fn reserve(
        &self,
        code: &TicketCode,
    ) -> impl Future<Output = Result<bool, RegistryError>> + Send;

    /// Whether `code` has been reserved.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the backing store fails.
    fn contains(
        &self,
        code: &TicketCode,
    ) -> impl Future<Output = Result<bool, RegistryError>> + Send;
}

/// In-process registry backed by a `HashSet`.
///
/// Suitable for development and tests. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryTicketCodeRegistry {
    codes: RwLock<HashSet<TicketCode>>,
}

impl InMemoryTicketCodeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reserved codes.
    pub async fn len(&self) -> usize {
        self.codes.read().await.len()
    }

    /// Whether no code has been reserved yet.
    pub async fn is_empty(&self) -> bool {
        self.codes.read().await.is_empty()
    }
}

impl TicketCodeRegistry for InMemoryTicketCodeRegistry {
    async fn reserve(&self, code: &TicketCode) -> Result<bool, RegistryError> {
        Ok(self.codes.write().await.insert(code.clone()))
    }

    async fn contains(&self, code: &TicketCode) -> Result<bool, RegistryError> {
        Ok(self.codes.read().await.contains(code))
    }
}

/// Issues ticket codes that are unique within a registry.
#[derive(Debug)]
pub struct TicketCodeIssuer<R> {
    registry: R,
    max_attempts: u32,
}

impl<R: TicketCodeRegistry> TicketCodeIssuer<R> {
    /// Create an issuer with [`DEFAULT_MAX_ATTEMPTS`].
    #[must_use]
    pub const fn new(registry: R) -> Self {
        Self {
            registry,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the number of draws before giving up. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Configured number of draws.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Draw a code and reserve it, retrying on collision.
    ///
    /// # Errors
    ///
    /// - [`IssueError::Exhausted`] if every draw was already reserved
    /// - [`IssueError::Registry`] if the registry fails
    pub async fn issue(&self) -> Result<TicketCode, IssueError> {
        for attempt in 1..=self.max_attempts {
            let code = ticket_code::generate();

            if self.registry.reserve(&code).await? {
                metrics::counter!("ticket_codes.issued").increment(1);
                tracing::debug!(code = %code, attempt, "Ticket code issued");
                return Ok(code);
            }

            metrics::counter!("ticket_codes.collisions").increment(1);
            tracing::warn!(
                code = %code,
                attempt,
                max_attempts = self.max_attempts,
                "Ticket code collision, drawing again"
            );
        }

        tracing::error!(
            attempts = self.max_attempts,
            "Giving up on ticket code issuance"
        );
        Err(IssueError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    /// Whether `code` has been issued through this registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the registry fails.
    pub async fn is_issued(&self, code: &TicketCode) -> Result<bool, RegistryError> {
        self.registry.contains(code).await
    }
}
