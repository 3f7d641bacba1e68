use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use ments_site::backend::{Backend, BackendConfig};
use ments_site::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    // Backend credentials are optional at startup: without them the site
    // still serves pages, but every submission fails with a setup message.
    let backend = match BackendConfig::from_env() {
        Some(config) => Backend::new(Some(config)),
        None => {
            log::warn!(
                "SUPABASE_URL / SUPABASE_ANON_KEY not set — pages will render, data calls are disabled"
            );
            Backend::new(None)
        }
    };

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server at http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(backend.clone()))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Marketing pages + waitlist
            .route("/", web::get().to(handlers::pages::home))
            .route("/waitlist", web::post().to(handlers::waitlist_handlers::submit))
            .route("/about", web::get().to(handlers::pages::about))
            .route("/blog", web::get().to(handlers::pages::blog))
            // Community registration
            .route("/community", web::get().to(handlers::community_handlers::form))
            .route(
                "/community/register",
                web::post().to(handlers::community_handlers::submit),
            )
            // Events
            .route("/events", web::get().to(handlers::event_handlers::events_page))
            .route(
                "/events/registration",
                web::get().to(handlers::event_handlers::registration_form),
            )
            .route(
                "/events/registration",
                web::post().to(handlers::event_handlers::register),
            )
            // Careers
            .route("/careers", web::get().to(handlers::career_handlers::careers_page))
            .route(
                "/careers/referrals",
                web::get().to(handlers::career_handlers::referrals),
            )
            // Account deletion — HTML flow and JSON API
            .route("/delete-account", web::get().to(handlers::deletion_handlers::form))
            .route(
                "/delete-account",
                web::post().to(handlers::deletion_handlers::submit),
            )
            .route(
                "/api/account/delete",
                web::post().to(handlers::deletion_handlers::api_submit),
            )
            .route(
                "/api/account/delete",
                web::to(handlers::deletion_handlers::api_method_not_allowed),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
