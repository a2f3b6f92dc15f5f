//! HTTP handlers

mod auth;
mod domains;
mod health;
mod warming;

use actix_web::web;

/// Register every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health)).service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/domains")
                    .route("", web::get().to(domains::list))
                    .route("/import", web::post().to(domains::import))
                    .route("/purchase", web::post().to(domains::purchase))
                    .route("/{id}", web::delete().to(domains::delete))
                    .route("/{id}/configure-dns", web::post().to(domains::configure_dns))
                    .route(
                        "/{id}/enable-email-routing",
                        web::post().to(domains::enable_email_routing),
                    )
                    .route("/{id}/enable-warming", web::post().to(domains::enable_warming))
                    .route("/{id}/warming-status", web::get().to(domains::warming_status))
                    .route("/{id}/fix-bounces", web::post().to(domains::fix_bounces)),
            )
            .service(
                web::scope("/warming")
                    .route("/status", web::get().to(warming::status))
                    .route("/start", web::post().to(warming::start))
                    .route("/stop", web::post().to(warming::stop))
                    .route("/config", web::put().to(warming::update_config)),
            ),
    );
}
