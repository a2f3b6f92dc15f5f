//! Shared application state

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use sharkmail_core::services::{
    DnsSetupService, DomainService, ServiceContext, WarmingControlService, WarmingService,
};
use sharkmail_provider::{CloudflareProvider, ResendProvider};

use crate::adapters::{
    DatabaseDomainRepository, DatabaseWarmingActivityRepository, DatabaseWarmingSessionRepository,
};
use crate::config::AppConfig;

/// State shared by every handler and the engine loop.
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub ctx: Arc<ServiceContext>,
    pub domains: DomainService,
    pub dns_setup: DnsSetupService,
    pub warming: WarmingService,
    pub control: WarmingControlService,
}

impl AppState {
    /// Wire repositories, providers, and services together.
    #[must_use]
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        let ctx = Arc::new(ServiceContext::new(
            Arc::new(DatabaseDomainRepository::new(db.clone())),
            Arc::new(DatabaseWarmingSessionRepository::new(db.clone())),
            Arc::new(DatabaseWarmingActivityRepository::new(db.clone())),
            Arc::new(CloudflareProvider::new(
                config.providers.cloudflare_api_token.clone(),
            )),
            Arc::new(ResendProvider::new(config.providers.resend_api_key.clone())),
        ));

        Self {
            config,
            db,
            domains: DomainService::new(ctx.clone()),
            dns_setup: DnsSetupService::new(ctx.clone()),
            warming: WarmingService::new(ctx.clone()),
            control: WarmingControlService::new(ctx.clone()),
            ctx,
        }
    }
}
