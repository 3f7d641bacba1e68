use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::backend::Backend;
use crate::errors::{AppError, render};
use crate::models::community::{
    self, CommunityRole, FounderDetails, InvestorMentorDetails, NewRegistration, RoleDetails,
};
use crate::templates_structs::{CommunityResultTemplate, CommunityTemplate};
use crate::validate;

/// Raw registration form fields. Both question blocks arrive; validation
/// requires the block matching the selected role and the payload builder
/// sends only that one.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RegistrationFormData {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub linkedin_url: String,
    // founder block
    #[serde(default)]
    pub startup_stage: String,
    #[serde(default)]
    pub biggest_challenge: String,
    #[serde(default)]
    pub preferred_support: String,
    #[serde(default)]
    pub comfort_sharing_feedback: String,
    #[serde(default)]
    pub connection_mode: String,
    #[serde(default)]
    pub mentorship_type: String,
    #[serde(default)]
    pub founder_feature_suggestion: String,
    // investor/mentor block
    #[serde(default)]
    pub focus_areas: String,
    #[serde(default)]
    pub preferred_startup_stage: String,
    #[serde(default)]
    pub approach_frequency: String,
    #[serde(default)]
    pub interaction_mode: String,
    #[serde(default)]
    pub interest_in: String,
    #[serde(default)]
    pub investor_feature_suggestion: String,
    // final question, asked of everyone
    #[serde(default)]
    pub unique_feature_suggestion: String,
}

fn validate_registration(form: &RegistrationFormData) -> (Option<CommunityRole>, Vec<String>) {
    let mut errors: Vec<String> = vec![];
    errors.extend(validate::validate_required(&form.full_name, "Full name", 120));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_optional(
        &form.organization,
        "Organization",
        200,
    ));
    errors.extend(validate::validate_required(
        &form.linkedin_url,
        "LinkedIn URL",
        300,
    ));
    errors.extend(validate::validate_required(
        &form.unique_feature_suggestion,
        "Feature suggestion",
        2000,
    ));

    let role = CommunityRole::parse(form.role.trim());
    match role {
        None => errors.push("Please select a role".to_string()),
        Some(CommunityRole::Founder) => {
            for (value, label) in [
                (&form.startup_stage, "Startup stage"),
                (&form.biggest_challenge, "Biggest challenge"),
                (&form.preferred_support, "Preferred support"),
                (&form.connection_mode, "Connection mode"),
                (&form.mentorship_type, "Mentorship type"),
            ] {
                errors.extend(validate::validate_required(value, label, 100));
            }
        }
        Some(CommunityRole::Investor) | Some(CommunityRole::Mentor) => {
            for (value, label) in [
                (&form.focus_areas, "Focus areas"),
                (&form.preferred_startup_stage, "Preferred startup stage"),
                (&form.approach_frequency, "Approach frequency"),
                (&form.interaction_mode, "Interaction mode"),
                (&form.interest_in, "Interest"),
            ] {
                errors.extend(validate::validate_required(value, label, 200));
            }
        }
    }

    (role, errors)
}

fn build_details(form: &RegistrationFormData, role: CommunityRole) -> RoleDetails {
    match role {
        CommunityRole::Founder => RoleDetails::Founder(FounderDetails {
            startup_stage: form.startup_stage.trim().to_string(),
            biggest_challenge: form.biggest_challenge.trim().to_string(),
            preferred_support: form.preferred_support.trim().to_string(),
            comfort_sharing_feedback: form
                .comfort_sharing_feedback
                .trim()
                .parse()
                .unwrap_or(3)
                .clamp(1, 5),
            connection_mode: form.connection_mode.trim().to_string(),
            mentorship_type: form.mentorship_type.trim().to_string(),
            founder_feature_suggestion: validate::non_empty(&form.founder_feature_suggestion),
        }),
        CommunityRole::Investor | CommunityRole::Mentor => {
            RoleDetails::InvestorMentor(InvestorMentorDetails {
                focus_areas: form.focus_areas.trim().to_string(),
                preferred_startup_stage: form.preferred_startup_stage.trim().to_string(),
                approach_frequency: form.approach_frequency.trim().to_string(),
                interaction_mode: form.interaction_mode.trim().to_string(),
                interest_in: form.interest_in.trim().to_string(),
                investor_feature_suggestion: validate::non_empty(
                    &form.investor_feature_suggestion,
                ),
            })
        }
    }
}

pub async fn form() -> Result<HttpResponse, AppError> {
    render(CommunityTemplate {
        form: RegistrationFormData::default(),
        errors: vec![],
    })
}

pub async fn submit(
    backend: web::Data<Backend>,
    form: web::Form<RegistrationFormData>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let (role, errors) = validate_registration(&form);
    let Some(role) = role else {
        return render(CommunityTemplate { form, errors });
    };
    if !errors.is_empty() {
        return render(CommunityTemplate { form, errors });
    }

    let registration = NewRegistration {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        role,
        organization: validate::non_empty(&form.organization),
        linkedin_url: form.linkedin_url.trim().to_string(),
        unique_feature_suggestion: form.unique_feature_suggestion.trim().to_string(),
        details: build_details(&form, role),
    };

    match community::submit(&backend, &registration).await {
        Ok(_) => render(CommunityResultTemplate),
        Err(e) => {
            log::error!("Community registration failed: {e}");
            render(CommunityTemplate {
                form,
                errors: vec![e.user_message().to_string()],
            })
        }
    }
}
