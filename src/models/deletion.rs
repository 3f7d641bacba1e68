//! Account-deletion requests. Deduplication lives in the backend procedure;
//! this side validates, calls it, and reports the outcome.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::backend::{Backend, DataError};
use crate::validate;

/// Why the user is leaving; mirrors the form's option values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletionReason {
    NotUseful,
    Complex,
    BetterAlternative,
    Privacy,
    Temporary,
    Other,
}

impl DeletionReason {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not-useful" => Some(DeletionReason::NotUseful),
            "complex" => Some(DeletionReason::Complex),
            "better-alternative" => Some(DeletionReason::BetterAlternative),
            "privacy" => Some(DeletionReason::Privacy),
            "temporary" => Some(DeletionReason::Temporary),
            "other" => Some(DeletionReason::Other),
            _ => None,
        }
    }
}

/// Input to the deletion-request procedure.
#[derive(Debug, Clone)]
pub struct NewDeletionRequest {
    pub username: String,
    pub email: String,
    pub reason: DeletionReason,
    pub feedback: String,
}

/// What the backend procedure reports back. A duplicate is a successful
/// outcome — the request already exists — never an error.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletionOutcome {
    #[serde(default)]
    pub is_duplicate: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl DeletionOutcome {
    /// Confirmation line for the user; the procedure's own message wins.
    pub fn user_message(&self) -> String {
        match &self.message {
            Some(m) if !m.is_empty() => m.clone(),
            _ if self.is_duplicate => {
                "A deletion request is already being processed for this email.".to_string()
            }
            _ => "Your account deletion request has been received and is being processed."
                .to_string(),
        }
    }
}

/// Validate and submit a deletion request.
///
/// Username and a well-formed email are checked before any network call.
/// The backend procedure decides whether an equivalent pending request
/// already exists.
pub async fn submit_request(
    backend: &Backend,
    request: &NewDeletionRequest,
) -> Result<DeletionOutcome, DataError> {
    if request.username.trim().is_empty() || request.email.trim().is_empty() {
        return Err(DataError::Validation(
            "Email and username are required".to_string(),
        ));
    }
    if !validate::is_valid_email(request.email.trim()) {
        return Err(DataError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    let params = json!({
        "p_username": request.username.trim(),
        "p_email": request.email.trim(),
        "p_reason": request.reason,
        "p_feedback": request.feedback,
    });
    backend
        .rpc("handle_account_deletion_request", &params)
        .await
}
