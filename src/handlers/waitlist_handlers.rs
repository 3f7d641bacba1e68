use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::backend::Backend;
use crate::errors::{AppError, render};
use crate::models::waitlist::{self, NewWaitlistEntry};
use crate::templates_structs::{HomeTemplate, WaitlistResultTemplate};
use crate::validate;

/// Raw waitlist form fields, echoed back into the template on error so the
/// visitor never loses what they typed.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct WaitlistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub interest: String,
    #[serde(default)]
    pub message: String,
}

fn validate_waitlist_form(form: &WaitlistForm) -> Vec<String> {
    let mut errors: Vec<String> = vec![];
    errors.extend(validate::validate_required(&form.name, "Name", 120));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_optional(&form.phone, "Phone", 30));
    errors.extend(validate::validate_optional(&form.interest, "Interest", 200));
    errors.extend(validate::validate_optional(&form.message, "Message", 2000));
    errors
}

pub async fn submit(
    backend: web::Data<Backend>,
    form: web::Form<WaitlistForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let errors = validate_waitlist_form(&form);
    if !errors.is_empty() {
        return render(HomeTemplate { form, errors });
    }

    let entry = NewWaitlistEntry {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: validate::non_empty(&form.phone),
        interest: validate::non_empty(&form.interest),
        message: validate::non_empty(&form.message),
    };

    match waitlist::add_entry(&backend, &entry).await {
        Ok(outcome) => render(WaitlistResultTemplate {
            is_duplicate: outcome.is_duplicate,
        }),
        Err(e) if e.is_duplicate() => render(WaitlistResultTemplate { is_duplicate: true }),
        Err(e) => {
            log::error!("Waitlist submission failed: {e}");
            render(HomeTemplate {
                form,
                errors: vec![e.user_message().to_string()],
            })
        }
    }
}
