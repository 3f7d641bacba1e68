use askama::Template;

use crate::handlers::community_handlers::RegistrationFormData;
use crate::handlers::deletion_handlers::DeleteAccountForm;
use crate::handlers::event_handlers::EventRegistrationForm;
use crate::handlers::waitlist_handlers::WaitlistForm;
use crate::models::event::Event;
use crate::models::job::JobListing;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub form: WaitlistForm,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "waitlist_result.html")]
pub struct WaitlistResultTemplate {
    pub is_duplicate: bool,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogTemplate;

#[derive(Template)]
#[template(path = "community.html")]
pub struct CommunityTemplate {
    pub form: RegistrationFormData,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "community_result.html")]
pub struct CommunityResultTemplate;

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsTemplate {
    pub event: Option<Event>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "event_registration.html")]
pub struct EventRegistrationTemplate {
    pub event: Option<Event>,
    pub form: EventRegistrationForm,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "event_registration_result.html")]
pub struct EventRegistrationResultTemplate;

#[derive(Template)]
#[template(path = "careers.html")]
pub struct CareersTemplate;

#[derive(Template)]
#[template(path = "referrals.html")]
pub struct ReferralsTemplate {
    pub jobs: Vec<JobListing>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "delete_account.html")]
pub struct DeleteAccountTemplate {
    pub form: DeleteAccountForm,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "delete_account_result.html")]
pub struct DeletionResultTemplate {
    pub message: String,
    pub is_duplicate: bool,
}
