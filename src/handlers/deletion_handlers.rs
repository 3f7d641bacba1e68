use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::backend::{Backend, DataError};
use crate::errors::{AppError, render};
use crate::models::deletion::{self, DeletionReason, NewDeletionRequest};
use crate::templates_structs::{DeleteAccountTemplate, DeletionResultTemplate};
use crate::validate;

/// Raw delete-account form fields. `confirmation` is a checkbox: present
/// when ticked, absent otherwise.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DeleteAccountForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub confirmation: Option<String>,
}

fn validate_deletion_form(form: &DeleteAccountForm) -> (Option<DeletionReason>, Vec<String>) {
    let mut errors: Vec<String> = vec![];
    if form.confirmation.is_none() {
        errors.push(
            "Please confirm that you understand the consequences of deleting your account."
                .to_string(),
        );
    }
    errors.extend(validate::validate_required(&form.username, "Username", 100));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_optional(&form.feedback, "Feedback", 2000));

    let reason = DeletionReason::parse(form.reason.trim());
    if reason.is_none() {
        errors.push("Please select a reason".to_string());
    }

    (reason, errors)
}

pub async fn form() -> Result<HttpResponse, AppError> {
    render(DeleteAccountTemplate {
        form: DeleteAccountForm::default(),
        errors: vec![],
    })
}

pub async fn submit(
    backend: web::Data<Backend>,
    form: web::Form<DeleteAccountForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let (reason, errors) = validate_deletion_form(&form);
    let Some(reason) = reason else {
        return render(DeleteAccountTemplate { form, errors });
    };
    if !errors.is_empty() {
        return render(DeleteAccountTemplate { form, errors });
    }

    let request = NewDeletionRequest {
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        reason,
        feedback: form.feedback.trim().to_string(),
    };

    match deletion::submit_request(&backend, &request).await {
        Ok(outcome) => render(DeletionResultTemplate {
            message: outcome.user_message(),
            is_duplicate: outcome.is_duplicate,
        }),
        Err(e) => {
            log::error!("Deletion request failed: {e}");
            render(DeleteAccountTemplate {
                form,
                errors: vec![e.user_message().to_string()],
            })
        }
    }
}

/// JSON body for the `/api/account/delete` endpoint.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub feedback: String,
}

fn bad_request(details: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "error": "Validation failed",
        "details": details,
    }))
}

/// `POST /api/account/delete` — the JSON flow the mobile clients use.
pub async fn api_submit(
    backend: web::Data<Backend>,
    body: web::Json<DeleteAccountRequest>,
) -> HttpResponse {
    let request = body.into_inner();

    if request.email.trim().is_empty() || request.username.trim().is_empty() {
        return bad_request("Email and username are required");
    }
    if !validate::is_valid_email(request.email.trim()) {
        return bad_request("Please enter a valid email address");
    }
    let Some(reason) = DeletionReason::parse(request.reason.trim()) else {
        return bad_request("Please select a valid reason");
    };

    let request = NewDeletionRequest {
        username: request.username.trim().to_string(),
        email: request.email.trim().to_string(),
        reason,
        feedback: request.feedback.trim().to_string(),
    };

    match deletion::submit_request(&backend, &request).await {
        Ok(outcome) if outcome.is_duplicate => HttpResponse::Ok().json(json!({
            "success": true,
            "isDuplicate": true,
            "message": outcome.user_message(),
        })),
        Ok(outcome) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": outcome.user_message(),
        })),
        Err(DataError::Validation(details)) => bad_request(&details),
        Err(e) => {
            log::error!("Deletion request failed: {e}");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error",
                "details": e.user_message(),
            }))
        }
    }
}

/// Anything but POST on the API route.
pub async fn api_method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({ "error": "Method not allowed" }))
}
