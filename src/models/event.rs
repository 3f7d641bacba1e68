//! Events: the next upcoming event and registrations for it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::backend::{Backend, DataError};

/// A row in the `events` table. The info-panel columns are spelled the way
/// the backend spells them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "About")]
    pub about: Option<String>,
    #[serde(default, rename = "Who_Should_Participate")]
    pub who_should_participate: Option<String>,
    #[serde(default, rename = "Why_Participate")]
    pub why_participate: Option<String>,
    #[serde(default, rename = "Event_Flow")]
    pub event_flow: Option<String>,
    #[serde(default, rename = "Judging_Criteria")]
    pub judging_criteria: Option<String>,
}

/// The event with the earliest date, treated as "next upcoming".
/// No events is an empty state for the caller to render, not an error.
pub async fn next_event(backend: &Backend) -> Result<Option<Event>, DataError> {
    let events: Vec<Event> = backend
        .select("events")
        .order("date", false)
        .limit(1)
        .fetch()
        .await?;
    Ok(events.into_iter().next())
}

/// Attendee designation choices; `Other` carries free text at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Designation {
    Student,
    Founder,
    WorkingProfessional,
    Investor,
    Mentor,
    Other,
}

impl Designation {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Designation::Student),
            "founder" => Some(Designation::Founder),
            "working-professional" => Some(Designation::WorkingProfessional),
            "investor" => Some(Designation::Investor),
            "mentor" => Some(Designation::Mentor),
            "other" => Some(Designation::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Designation::Student => "student",
            Designation::Founder => "founder",
            Designation::WorkingProfessional => "working-professional",
            Designation::Investor => "investor",
            Designation::Mentor => "mentor",
            Designation::Other => "other",
        }
    }
}

/// Registration form payload for the active event. `event_id` is `None`
/// until the events lookup has resolved one.
#[derive(Debug, Clone)]
pub struct NewEventRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub organization: Option<String>,
    pub designation: Designation,
    pub other_designation: Option<String>,
    pub linkedin: Option<String>,
    pub city: Option<String>,
    pub event_id: Option<String>,
}

impl NewEventRegistration {
    /// The designation value that gets stored: the free text when the
    /// attendee picked "Other", the fixed label otherwise. The original
    /// free text is kept in `other_designation` either way.
    pub fn effective_designation(&self) -> String {
        match (self.designation, self.other_designation.as_deref()) {
            (Designation::Other, Some(text)) if !text.trim().is_empty() => {
                text.trim().to_string()
            }
            _ => self.designation.as_str().to_string(),
        }
    }
}

/// A stored row in the `registrations` table.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRegistration {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub organization: Option<String>,
    pub designation: String,
    #[serde(default)]
    pub other_designation: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub event_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert a registration. Refuses to touch the backend until an event has
/// been resolved — submitting with no event is a local error, not a write.
pub async fn register(
    backend: &Backend,
    registration: &NewEventRegistration,
) -> Result<EventRegistration, DataError> {
    let event_id = match registration.event_id.as_deref() {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            return Err(DataError::Validation(
                "No event found. Registration opens when the next event is announced."
                    .to_string(),
            ));
        }
    };

    let row = json!({
        "name": registration.name,
        "email": registration.email,
        "phone": registration.phone,
        "organization": registration.organization,
        "designation": registration.effective_designation(),
        "other_designation": registration.other_designation,
        "linkedin": registration.linkedin,
        "city": registration.city,
        "event_id": event_id,
    });
    let rows: Vec<EventRegistration> = backend.insert("registrations", &row).await?;
    rows.into_iter().next().ok_or_else(|| {
        DataError::Unknown("Backend returned no representation for the registration".to_string())
    })
}
