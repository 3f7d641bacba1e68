//! Pre-launch waitlist: add-or-update keyed by email.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::backend::{Backend, DataError};

/// Review pipeline state for a waitlist row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    Pending,
    Contacted,
    Approved,
    Rejected,
}

/// A row in the `waitlist` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub interest: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<WaitlistStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Form payload for a signup; server-owned columns are stamped on the way in.
#[derive(Debug, Clone)]
pub struct NewWaitlistEntry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub interest: Option<String>,
    pub message: Option<String>,
}

/// Result of an add: the stored row, plus whether it replaced an earlier
/// signup with the same email.
#[derive(Debug)]
pub struct WaitlistOutcome {
    pub entry: Option<WaitlistEntry>,
    pub is_duplicate: bool,
}

/// Add a signup, or refresh the existing one with the same email.
///
/// On a repeat email the mutable fields are overwritten, `status` resets to
/// `pending` and `updated_at` is stamped. The lookup and the write are two
/// separate calls, not a transaction: two near-simultaneous submissions for
/// one email can race. Last write wins, or the insert loses to the unique
/// index and surfaces as a duplicate.
pub async fn add_entry(
    backend: &Backend,
    entry: &NewWaitlistEntry,
) -> Result<WaitlistOutcome, DataError> {
    let existing: Vec<WaitlistEntry> = backend
        .select("waitlist")
        .eq("email", &entry.email)
        .limit(1)
        .fetch()
        .await?;

    if existing.is_empty() {
        let row = json!({
            "name": entry.name,
            "email": entry.email,
            "phone": entry.phone,
            "interest": entry.interest,
            "message": entry.message,
            "status": WaitlistStatus::Pending,
        });
        let created: Vec<WaitlistEntry> = match backend.insert("waitlist", &row).await {
            Ok(rows) => rows,
            // the lookup raced another submission; the unique index won
            Err(e) if e.is_duplicate() => {
                return Ok(WaitlistOutcome {
                    entry: None,
                    is_duplicate: true,
                });
            }
            Err(e) => return Err(e),
        };
        Ok(WaitlistOutcome {
            entry: created.into_iter().next(),
            is_duplicate: false,
        })
    } else {
        let patch = json!({
            "name": entry.name,
            "phone": entry.phone,
            "interest": entry.interest,
            "message": entry.message,
            "status": WaitlistStatus::Pending,
            "updated_at": Utc::now().to_rfc3339(),
        });
        let updated: Vec<WaitlistEntry> = backend
            .update("waitlist", &patch)
            .eq("email", &entry.email)
            .fetch()
            .await?;
        Ok(WaitlistOutcome {
            entry: updated.into_iter().next(),
            is_duplicate: true,
        })
    }
}

/// Full list, newest first (admin view).
pub async fn list_entries(backend: &Backend) -> Result<Vec<WaitlistEntry>, DataError> {
    backend
        .select("waitlist")
        .order("created_at", true)
        .fetch()
        .await
}
