//! Job listings for the referrals page. Read-only.

use serde::{Deserialize, Serialize};

use crate::backend::{Backend, DataError};

/// A row in the `jobs` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub company_name: String,
    pub role: String,
    pub about_role: String,
    pub experience_required: String,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub form_link: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Active listings, newest first. An empty list is a valid state, not an
/// error; any filtering beyond `is_active` is a presentation concern.
pub async fn active_listings(backend: &Backend) -> Result<Vec<JobListing>, DataError> {
    backend
        .select("jobs")
        .eq("is_active", "true")
        .order("created_at", true)
        .fetch()
        .await
}
