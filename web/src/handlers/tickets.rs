//! Ticket code API endpoints.
//!
//! - POST /api/tickets/codes - Issue a new ticket code, optionally mailing it
//! - GET /api/tickets/codes/:code - Check a code from a URL (QR scan links)
//! - POST /api/tickets/validate - Check a code from a JSON body (manual entry)
//!
//! Validation never fails on malformed input: a code that does not match the
//! `TKT-XXXXXX` format is reported as `valid: false` with a reason.

use crate::error::AppError;
use crate::extractors::AppJson;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use eventdesk_core::mail::{self, TicketMailer};
use eventdesk_core::ticket_code::TicketCode;
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to issue a ticket code.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IssueCodeRequest {
    /// Ticket holder to mail the code to
    #[serde(default)]
    pub email: Option<String>,
    /// Event named in the confirmation mail
    #[serde(default)]
    pub event_name: Option<String>,
}

impl IssueCodeRequest {
    /// The requested event name, or `default` when it is absent or blank.
    #[must_use]
    pub fn event_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.event_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(default)
    }
}

/// Response after issuing a ticket code.
#[derive(Debug, Serialize, Deserialize)]
pub struct IssueCodeResponse {
    /// Issued code
    pub code: TicketCode,
    /// Address the confirmation was sent to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailed_to: Option<String>,
}

/// Request to validate a ticket code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateCodeRequest {
    /// Candidate code, exactly as entered or scanned
    pub code: String,
}

/// Validation result.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Candidate as received
    pub code: String,
    /// Whether the candidate is a well-formed ticket code
    pub valid: bool,
    /// Whether the code was issued by this service
    pub registered: bool,
    /// Why the candidate is malformed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Issue a new ticket code.
///
/// The code is reserved in the registry before it is returned. When `email`
/// is present the address is checked first, so a bad address never consumes
/// a code, and the confirmation is sent after reservation.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/tickets/codes \
///   -H "Content-Type: application/json" \
///   -d '{"email": "holder@example.com", "event_name": "Launch Night"}'
/// # {"code":"TKT-7QX2KD","mailed_to":"holder@example.com"}
/// ```
///
/// # Errors
///
/// - 400, 415 or 422 if the body is not the expected JSON
/// - 422 if `email` is not a usable address
/// - 503 if no unique code could be drawn or the mail provider failed
/// - 500 if the registry failed
pub async fn issue_code(
    State(state): State<AppState>,
    AppJson(request): AppJson<IssueCodeRequest>,
) -> Result<(StatusCode, Json<IssueCodeResponse>), AppError> {
    if let Some(email) = &request.email {
        mail::validate_recipient(email)?;
    }

    let code = state.issuer.issue().await?;
    info!(code = %code, "Ticket code issued");

    if let Some(email) = &request.email {
        let event_name = request.event_name_or(&state.default_event_name);

        if let Err(error) = state.mailer.send_ticket_code(email, &code, event_name).await {
            tracing::warn!(
                code = %code,
                %error,
                "Ticket code issued but confirmation mail failed"
            );
            return Err(error.into());
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(IssueCodeResponse {
            code,
            mailed_to: request.email,
        }),
    ))
}

/// Check a ticket code taken from the URL path.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/api/tickets/codes/TKT-7QX2KD
/// # {"code":"TKT-7QX2KD","valid":true,"registered":true}
/// ```
///
/// # Errors
///
/// Returns 500 only if the registry fails; malformed codes are a 200 answer.
pub async fn get_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ValidationResponse>, AppError> {
    validate(&state, code).await.map(Json)
}

/// Check a ticket code submitted as JSON.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/tickets/validate \
///   -H "Content-Type: application/json" \
///   -d '{"code": "tkt-7qx2kd"}'
/// # {"code":"tkt-7qx2kd","valid":false,"registered":false,"reason":"Ticket code must start with \"TKT-\""}
/// ```
///
/// # Errors
///
/// Returns 400, 415 or 422 if the body is not `{"code": "..."}` JSON, and 500
/// if the registry fails. Malformed codes are a 200 answer.
pub async fn validate_code(
    State(state): State<AppState>,
    AppJson(request): AppJson<ValidateCodeRequest>,
) -> Result<Json<ValidationResponse>, AppError> {
    validate(&state, request.code).await.map(Json)
}

async fn validate(state: &AppState, candidate: String) -> Result<ValidationResponse, AppError> {
    match TicketCode::parse(&candidate) {
        Ok(code) => {
            let registered = state.issuer.is_issued(&code).await?;
            Ok(ValidationResponse {
                code: candidate,
                valid: true,
                registered,
                reason: None,
            })
        }
        Err(reason) => Ok(ValidationResponse {
            code: candidate,
            valid: false,
            registered: false,
            reason: Some(reason.to_string()),
        }),
    }
}
