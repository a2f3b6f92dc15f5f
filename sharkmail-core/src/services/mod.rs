//! Business logic service layer

mod dns_setup_service;
mod domain_service;
mod warming_control_service;
mod warming_service;

pub use dns_setup_service::DnsSetupService;
pub use domain_service::DomainService;
pub use warming_control_service::{WarmingControlService, interval_between_sends};
pub use warming_service::WarmingService;

use std::sync::Arc;

use sharkmail_provider::{DnsProvider, MailProvider};

use crate::error::{CoreError, CoreResult};
use crate::traits::{DomainRepository, WarmingActivityRepository, WarmingSessionRepository};
use crate::types::Domain;

/// Service context - holds all dependencies.
///
/// The platform layer creates this context, injecting its storage
/// implementations and the configured providers.
pub struct ServiceContext {
    /// Domain persistence
    pub domain_repository: Arc<dyn DomainRepository>,
    /// Warming session persistence
    pub warming_sessions: Arc<dyn WarmingSessionRepository>,
    /// Warming activity log
    pub warming_activity: Arc<dyn WarmingActivityRepository>,
    /// DNS provider (zones, records, routing)
    pub dns: Arc<dyn DnsProvider>,
    /// Mail provider (sending domains, outbound mail)
    pub mailer: Arc<dyn MailProvider>,
}

impl ServiceContext {
    /// Create the service context.
    #[must_use]
    pub fn new(
        domain_repository: Arc<dyn DomainRepository>,
        warming_sessions: Arc<dyn WarmingSessionRepository>,
        warming_activity: Arc<dyn WarmingActivityRepository>,
        dns: Arc<dyn DnsProvider>,
        mailer: Arc<dyn MailProvider>,
    ) -> Self {
        Self {
            domain_repository,
            warming_sessions,
            warming_activity,
            dns,
            mailer,
        }
    }

    /// Fetch a domain the account owns, or fail with `DomainNotFound`.
    pub async fn require_domain(&self, user_id: &str, domain_id: &str) -> CoreResult<Domain> {
        self.domain_repository
            .find_by_id(user_id, domain_id)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(domain_id.to_string()))
    }
}

/// A domain's zone reference, or a validation error telling the user to
/// re-import.
pub(crate) fn require_zone(domain: &Domain) -> CoreResult<String> {
    domain.zone_id.clone().ok_or_else(|| {
        CoreError::ValidationError(format!(
            "Domain {} has no DNS zone; re-import it from the provider",
            domain.domain_name
        ))
    })
}
