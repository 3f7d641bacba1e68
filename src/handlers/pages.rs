use actix_web::HttpResponse;

use crate::errors::{AppError, render};
use crate::handlers::waitlist_handlers::WaitlistForm;
use crate::templates_structs::{AboutTemplate, BlogTemplate, HomeTemplate};

pub async fn home() -> Result<HttpResponse, AppError> {
    render(HomeTemplate {
        form: WaitlistForm::default(),
        errors: vec![],
    })
}

pub async fn about() -> Result<HttpResponse, AppError> {
    render(AboutTemplate)
}

pub async fn blog() -> Result<HttpResponse, AppError> {
    render(BlogTemplate)
}
