use actix_web::{HttpResponse, web};

use crate::backend::Backend;
use crate::errors::{AppError, render};
use crate::models::job;
use crate::templates_structs::{CareersTemplate, ReferralsTemplate};

pub async fn careers_page() -> Result<HttpResponse, AppError> {
    render(CareersTemplate)
}

pub async fn referrals(backend: web::Data<Backend>) -> Result<HttpResponse, AppError> {
    match job::active_listings(&backend).await {
        Ok(jobs) => render(ReferralsTemplate { jobs, error: None }),
        Err(e) => {
            log::error!("Job listing query failed: {e}");
            render(ReferralsTemplate {
                jobs: vec![],
                error: Some("Failed to load job listings. Please try again later.".to_string()),
            })
        }
    }
}
