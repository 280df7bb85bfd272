//! Ticket codes.
//!
//! A ticket code is the short identifier printed on a ticket and encoded into
//! its QR image: the literal prefix `TKT-` followed by six characters drawn
//! from `A-Z0-9`, for example `TKT-7QX2KD`.
//!
//! Codes are random but not secret: they identify a ticket, and access checks
//! happen against the owning record.
//!
//! The generator makes no uniqueness promise. Callers that persist codes go
//! through [`TicketCodeIssuer`](crate::issuance::TicketCodeIssuer), which
//! reserves each code in a registry and retries on collision.
//!
//! # Example
//!
//! ```
//! use eventdesk_core::ticket_code::{self, TicketCode};
//!
//! let code = ticket_code::generate();
//! assert!(ticket_code::is_valid(code.as_str()));
//!
//! let scanned: TicketCode = "TKT-ABC123".parse().unwrap();
//! assert_eq!(scanned.suffix(), "ABC123");
//! assert!(!ticket_code::is_valid("tkt-ABC123"));
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Literal prefix every ticket code starts with.
pub const PREFIX: &str = "TKT-";

/// Number of random characters after the prefix.
pub const SUFFIX_LEN: usize = 6;

/// Total length of a ticket code, in characters.
pub const CODE_LEN: usize = PREFIX.len() + SUFFIX_LEN;

/// Symbols the random suffix is drawn from.
pub const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Reason a string is not a ticket code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TicketCodeError {
    /// The candidate does not have exactly ten characters.
    #[error("Ticket code must be 10 characters long, got {length}")]
    WrongLength {
        /// Length of the rejected candidate, in characters
        length: usize,
    },

    /// The candidate does not start with `TKT-` (the prefix is case-sensitive).
    #[error("Ticket code must start with \"TKT-\"")]
    MissingPrefix,

    /// A suffix character is outside `A-Z0-9`.
    #[error("Invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// Offending character
        character: char,
        /// Zero-based character position within the candidate
        position: usize,
    },
}

/// A well-formed ticket code.
///
/// The only ways to obtain one are [`generate`], [`generate_with`] and the
/// checked parse ([`TicketCode::parse`], `FromStr`, `TryFrom<String>`, serde),
/// so holding a `TicketCode` means the format has already been checked.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketCode(String);

impl TicketCode {
    /// Parse a candidate string, reporting why it was rejected.
    ///
    /// Accepts exactly `TKT-` followed by six characters from `A-Z0-9`. No
    /// trimming or case folding is applied.
    ///
    /// # Errors
    ///
    /// Returns [`TicketCodeError`] describing the first format violation.
    pub fn parse(candidate: &str) -> Result<Self, TicketCodeError> {
        check(candidate)?;
        Ok(Self(candidate.to_string()))
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The six random characters after the prefix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.0[PREFIX.len()..]
    }

    /// Consume the code, returning the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TicketCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TicketCode {
    type Err = TicketCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TicketCode {
    type Error = TicketCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check(&value)?;
        Ok(Self(value))
    }
}

impl From<TicketCode> for String {
    fn from(code: TicketCode) -> Self {
        code.0
    }
}

/// Generate a fresh ticket code from the thread-local RNG.
///
/// Cannot fail and performs no I/O.
#[must_use]
pub fn generate() -> TicketCode {
    generate_with(&mut rand::thread_rng())
}

/// Generate a ticket code from the given RNG.
///
/// Each suffix character is sampled uniformly, with replacement, from
/// [`ALPHABET`].
#[must_use]
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> TicketCode {
    let mut code = String::with_capacity(CODE_LEN);
    code.push_str(PREFIX);
    for _ in 0..SUFFIX_LEN {
        let index = rng.gen_range(0..ALPHABET.len());
        code.push(char::from(ALPHABET[index]));
    }
    TicketCode(code)
}

/// Whether `candidate` is a well-formed ticket code.
///
/// Total over all strings: empty, over-length and non-ASCII input simply
/// yield `false`.
#[must_use]
pub fn is_valid(candidate: &str) -> bool {
    check(candidate).is_ok()
}

fn check(candidate: &str) -> Result<(), TicketCodeError> {
    let length = candidate.chars().count();
    if length != CODE_LEN {
        return Err(TicketCodeError::WrongLength { length });
    }

    let Some(suffix) = candidate.strip_prefix(PREFIX) else {
        return Err(TicketCodeError::MissingPrefix);
    };

    for (offset, character) in suffix.chars().enumerate() {
        if !is_code_char(character) {
            return Err(TicketCodeError::InvalidCharacter {
                character,
                position: PREFIX.len() + offset,
            });
        }
    }

    Ok(())
}

const fn is_code_char(character: char) -> bool {
    character.is_ascii_uppercase() || character.is_ascii_digit()
}
