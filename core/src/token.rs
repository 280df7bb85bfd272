//! Verification tokens.
//!
//! Random secrets mailed to users for email verification and account
//! actions (deactivation confirmation, sign-in links). Unlike ticket codes
//! these are credentials, so they come from a 256-bit draw and carry an
//! expiry.

use crate::environment::Clock;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Length of an encoded token (32 bytes, base64url without padding).
pub const TOKEN_LEN: usize = 43;

/// A verification token and the moment it stops being accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// URL-safe token value
    pub token: String,
    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Issue a new token valid for `ttl` from the clock's current time.
    ///
    /// Returns `None` if the expiry falls outside the representable date range.
    #[must_use]
    pub fn issue(clock: &dyn Clock, ttl: Duration) -> Option<Self> {
        let expires_at = clock.now().checked_add_signed(ttl)?;
        Some(Self {
            token: generate_token(),
            expires_at,
        })
    }

    /// Whether the token has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }
}

/// Generate a cryptographically secure random token.
///
/// Returns a 256-bit random token encoded as base64url (43 characters).
#[must_use]
pub fn generate_token() -> String {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Whether something expiring at `expires_at` has expired at `now`.
///
/// The expiry instant itself counts as expired.
#[must_use]
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= expires_at
}
