//! Sharkmail server entry point
//!
//! Actix-web REST API for the cold-email warming platform, plus the
//! background engine loop driving active warming sessions.

mod adapters;
mod auth;
mod config;
mod engine;
mod entities;
mod error;
mod handlers;
mod state;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::load()?;
    let bind_addr = config.bind_addr();
    let workers = config.server.workers.unwrap_or_else(num_cpus::get);

    tracing::info!("Connecting to database");
    let db = sea_orm::Database::connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    let state = web::Data::new(AppState::new(config, db));

    // The engine loop shares the same services the handlers use
    engine::spawn(state.clone().into_inner());

    tracing::info!("Listening on {}:{}", bind_addr.0, bind_addr.1);
    let app_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(handlers::configure)
    })
    .workers(workers)
    .bind(bind_addr)
    .context("Failed to bind listen address")?
    .run()
    .await
    .context("Server terminated abnormally")
}
