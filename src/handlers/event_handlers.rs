use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::backend::Backend;
use crate::errors::{AppError, render};
use crate::models::event::{self, Designation, NewEventRegistration};
use crate::templates_structs::{
    EventRegistrationResultTemplate, EventRegistrationTemplate, EventsTemplate,
};
use crate::validate;

pub async fn events_page(backend: web::Data<Backend>) -> Result<HttpResponse, AppError> {
    match event::next_event(&backend).await {
        Ok(event) => render(EventsTemplate { event, error: None }),
        Err(e) => {
            log::error!("Event lookup failed: {e}");
            render(EventsTemplate {
                event: None,
                error: Some("Failed to fetch event. Please try again later.".to_string()),
            })
        }
    }
}

pub async fn registration_form(backend: web::Data<Backend>) -> Result<HttpResponse, AppError> {
    // A lookup failure renders the same empty state as "no event yet":
    // either way there is nothing to register for right now.
    let event = event::next_event(&backend).await.unwrap_or_else(|e| {
        log::error!("Event lookup failed: {e}");
        None
    });
    render(EventRegistrationTemplate {
        event,
        form: EventRegistrationForm::default(),
        errors: vec![],
    })
}

/// Raw event-registration form fields; `event_id` rides along as a hidden
/// field resolved by the lookup.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventRegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub other_designation: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub event_id: String,
}

fn validate_event_form(form: &EventRegistrationForm) -> (Option<Designation>, Vec<String>) {
    let mut errors: Vec<String> = vec![];
    errors.extend(validate::validate_required(&form.name, "Name", 120));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_required(&form.phone, "Phone", 30));
    errors.extend(validate::validate_optional(
        &form.organization,
        "Organization",
        200,
    ));
    errors.extend(validate::validate_optional(&form.linkedin, "LinkedIn", 300));
    errors.extend(validate::validate_optional(&form.city, "City", 100));

    let designation = Designation::parse(form.designation.trim());
    match designation {
        None => errors.push("Please select a designation".to_string()),
        Some(Designation::Other) => {
            errors.extend(validate::validate_required(
                &form.other_designation,
                "Designation",
                100,
            ));
        }
        Some(_) => {}
    }

    (designation, errors)
}

pub async fn register(
    backend: web::Data<Backend>,
    form: web::Form<EventRegistrationForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let (designation, errors) = validate_event_form(&form);
    let Some(designation) = designation else {
        return rerender_form(&backend, form, errors).await;
    };
    if !errors.is_empty() {
        return rerender_form(&backend, form, errors).await;
    }

    let registration = NewEventRegistration {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        organization: validate::non_empty(&form.organization),
        designation,
        other_designation: validate::non_empty(&form.other_designation),
        linkedin: validate::non_empty(&form.linkedin),
        city: validate::non_empty(&form.city),
        event_id: validate::non_empty(&form.event_id),
    };

    match event::register(&backend, &registration).await {
        Ok(_) => render(EventRegistrationResultTemplate),
        Err(e) => {
            log::error!("Event registration failed: {e}");
            rerender_form(&backend, form, vec![e.user_message().to_string()]).await
        }
    }
}

/// Re-render the form with errors, looking the event up again so the page
/// header and the hidden `event_id` stay consistent.
async fn rerender_form(
    backend: &Backend,
    form: EventRegistrationForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let event = event::next_event(backend).await.unwrap_or(None);
    render(EventRegistrationTemplate {
        event,
        form,
        errors,
    })
}
