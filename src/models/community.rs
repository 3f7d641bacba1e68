//! Community registrations: founders, investors and mentors, each with
//! their own question block. Exactly one block goes to the backend, picked
//! by role — never both.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::backend::{Backend, DataError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunityRole {
    Founder,
    Investor,
    Mentor,
}

impl CommunityRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "founder" => Some(CommunityRole::Founder),
            "investor" => Some(CommunityRole::Investor),
            "mentor" => Some(CommunityRole::Mentor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommunityRole::Founder => "founder",
            CommunityRole::Investor => "investor",
            CommunityRole::Mentor => "mentor",
        }
    }
}

/// Review pipeline state for a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Verified,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Verified => "verified",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
        }
    }
}

/// Founder-only question block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FounderDetails {
    pub startup_stage: String,
    pub biggest_challenge: String,
    pub preferred_support: String,
    /// 1 (guarded) to 5 (an open book).
    pub comfort_sharing_feedback: i32,
    pub connection_mode: String,
    pub mentorship_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founder_feature_suggestion: Option<String>,
}

/// Question block shared by investors and mentors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorMentorDetails {
    pub focus_areas: String,
    pub preferred_startup_stage: String,
    pub approach_frequency: String,
    pub interaction_mode: String,
    pub interest_in: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor_feature_suggestion: Option<String>,
}

/// The role-specific half of a registration. Serializing a registration
/// flattens the active block into the payload, so the other role's columns
/// are never sent.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RoleDetails {
    Founder(FounderDetails),
    InvestorMentor(InvestorMentorDetails),
}

impl RoleDetails {
    /// Whether this block belongs to the given role.
    pub fn matches(&self, role: CommunityRole) -> bool {
        match self {
            RoleDetails::Founder(_) => role == CommunityRole::Founder,
            RoleDetails::InvestorMentor(_) => {
                matches!(role, CommunityRole::Investor | CommunityRole::Mentor)
            }
        }
    }
}

/// Payload for the `community_registrations` insert.
#[derive(Debug, Clone, Serialize)]
pub struct NewRegistration {
    pub full_name: String,
    pub email: String,
    pub role: CommunityRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub linkedin_url: String,
    pub unique_feature_suggestion: String,
    #[serde(flatten)]
    pub details: RoleDetails,
}

/// A stored registration, as the backend returns it. The role-specific
/// columns come back individually nullable, whichever block was saved.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityRegistration {
    #[serde(default)]
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub role: CommunityRole,
    #[serde(default)]
    pub organization: Option<String>,
    pub linkedin_url: String,
    #[serde(default)]
    pub unique_feature_suggestion: Option<String>,
    #[serde(default)]
    pub status: Option<RegistrationStatus>,
    #[serde(default)]
    pub startup_stage: Option<String>,
    #[serde(default)]
    pub biggest_challenge: Option<String>,
    #[serde(default)]
    pub preferred_support: Option<String>,
    #[serde(default)]
    pub comfort_sharing_feedback: Option<i32>,
    #[serde(default)]
    pub connection_mode: Option<String>,
    #[serde(default)]
    pub mentorship_type: Option<String>,
    #[serde(default)]
    pub founder_feature_suggestion: Option<String>,
    #[serde(default)]
    pub focus_areas: Option<String>,
    #[serde(default)]
    pub preferred_startup_stage: Option<String>,
    #[serde(default)]
    pub approach_frequency: Option<String>,
    #[serde(default)]
    pub interaction_mode: Option<String>,
    #[serde(default)]
    pub interest_in: Option<String>,
    #[serde(default)]
    pub investor_feature_suggestion: Option<String>,
    #[serde(default)]
    pub verification_notes: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Insert a registration. There is no upsert path: a repeat email fails as
/// a duplicate rather than overwriting the earlier answers.
pub async fn submit(
    backend: &Backend,
    registration: &NewRegistration,
) -> Result<CommunityRegistration, DataError> {
    if !registration.details.matches(registration.role) {
        return Err(DataError::Validation(
            "Role does not match the submitted question block".to_string(),
        ));
    }
    let rows: Vec<CommunityRegistration> = backend
        .insert("community_registrations", registration)
        .await?;
    rows.into_iter().next().ok_or_else(|| {
        DataError::Unknown("Backend returned no representation for the registration".to_string())
    })
}

/// All registrations, newest first (admin view).
pub async fn list_all(backend: &Backend) -> Result<Vec<CommunityRegistration>, DataError> {
    backend
        .select("community_registrations")
        .order("created_at", true)
        .fetch()
        .await
}

/// Registrations for one role, newest first (admin view).
pub async fn list_by_role(
    backend: &Backend,
    role: CommunityRole,
) -> Result<Vec<CommunityRegistration>, DataError> {
    backend
        .select("community_registrations")
        .eq("role", role.as_str())
        .order("created_at", true)
        .fetch()
        .await
}

/// Registrations in one pipeline state, newest first (admin view).
pub async fn list_by_status(
    backend: &Backend,
    status: RegistrationStatus,
) -> Result<Vec<CommunityRegistration>, DataError> {
    backend
        .select("community_registrations")
        .eq("status", status.as_str())
        .order("created_at", true)
        .fetch()
        .await
}

/// Move a registration through the review pipeline, stamping `verified_at`.
pub async fn update_status(
    backend: &Backend,
    id: &str,
    status: RegistrationStatus,
    notes: Option<&str>,
) -> Result<(), DataError> {
    let patch = json!({
        "status": status,
        "verification_notes": notes,
        "verified_at": Utc::now().to_rfc3339(),
    });
    let _rows: Vec<serde_json::Value> = backend
        .update("community_registrations", &patch)
        .eq("id", id)
        .fetch()
        .await?;
    Ok(())
}
