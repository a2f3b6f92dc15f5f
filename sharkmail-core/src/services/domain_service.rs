//! Domain registry service

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    Domain, DomainStatus, ImportDomainRequest, SetupLogEntry, WarmingStatus,
};

/// Domain registry service.
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    /// Create a domain service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List all domains for the account.
    pub async fn list_domains(&self, user_id: &str) -> CoreResult<Vec<Domain>> {
        self.ctx.domain_repository.find_all(user_id).await
    }

    /// Import an existing provider zone as a managed domain.
    ///
    /// Deduplicates by `domain_name` per account: a second import of the same
    /// name is a `DomainExists` conflict, so a client retry after a timeout
    /// can never produce two records. The zone is validated upstream before
    /// anything is persisted.
    pub async fn import_domain(
        &self,
        user_id: &str,
        request: ImportDomainRequest,
    ) -> CoreResult<(Domain, Vec<SetupLogEntry>)> {
        if let Some(existing) = self
            .ctx
            .domain_repository
            .find_by_name(user_id, &request.domain_name)
            .await?
        {
            return Err(CoreError::DomainExists(existing.domain_name));
        }

        // Zone must exist and be visible to the configured credentials;
        // a missing zone is fatal (the domain has to be re-imported)
        let zone = self.ctx.dns.get_zone(&request.zone_id).await?;

        let mut setup_log = vec![SetupLogEntry::success(
            "zone",
            format!("Found zone {} ({})", zone.name, zone.id),
        )];

        let domain = self
            .register(user_id, &request.domain_name, zone.id, zone.status.into())
            .await?;
        setup_log.push(SetupLogEntry::success(
            "registry",
            format!("Imported {}", domain.domain_name),
        ));

        Ok((domain, setup_log))
    }

    /// Purchase a new domain: create the zone at the provider, then register
    /// it with the same post-condition as an import.
    pub async fn purchase_domain(
        &self,
        user_id: &str,
        domain_name: &str,
    ) -> CoreResult<(Domain, Vec<SetupLogEntry>)> {
        if let Some(existing) = self
            .ctx
            .domain_repository
            .find_by_name(user_id, domain_name)
            .await?
        {
            return Err(CoreError::DomainExists(existing.domain_name));
        }

        let zone = self.ctx.dns.create_zone(domain_name).await?;

        let mut setup_log = vec![SetupLogEntry::success(
            "zone",
            format!("Created zone {} ({})", zone.name, zone.id),
        )];

        let domain = self
            .register(user_id, domain_name, zone.id, zone.status.into())
            .await?;
        setup_log.push(SetupLogEntry::success(
            "registry",
            format!("Registered {}", domain.domain_name),
        ));

        Ok((domain, setup_log))
    }

    /// Delete a domain. Deleting an unknown id is a `DomainNotFound` error,
    /// consistent with every other by-id operation.
    pub async fn delete_domain(&self, user_id: &str, domain_id: &str) -> CoreResult<()> {
        let removed = self
            .ctx
            .domain_repository
            .delete(user_id, domain_id)
            .await?;
        if !removed {
            return Err(CoreError::DomainNotFound(domain_id.to_string()));
        }
        log::info!("Deleted domain {domain_id}");
        Ok(())
    }

    /// Persist a fresh domain record with all lifecycle flags cleared.
    async fn register(
        &self,
        user_id: &str,
        domain_name: &str,
        zone_id: String,
        status: DomainStatus,
    ) -> CoreResult<Domain> {
        let now = Utc::now();
        let domain = Domain {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            domain_name: domain_name.to_string(),
            status,
            zone_id: Some(zone_id),
            dns_configured: false,
            email_routing_enabled: false,
            forward_to: None,
            warming_enabled: false,
            warming_status: WarmingStatus::NotEnabled,
            created_at: now,
            updated_at: now,
        };

        self.ctx.domain_repository.insert(&domain).await?;
        log::info!("Registered domain {} for {user_id}", domain.domain_name);
        Ok(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::test_utils::{create_test_services, import_request};

    #[tokio::test]
    async fn import_creates_unconfigured_domain() {
        let (services, fixtures) = create_test_services();
        fixtures.dns.add_zone("z1", "example.com");

        let (domain, setup_log) = services
            .domains
            .import_domain("u1", import_request("z1", "example.com"))
            .await
            .unwrap();

        assert_eq!(domain.domain_name, "example.com");
        assert_eq!(domain.zone_id.as_deref(), Some("z1"));
        assert!(!domain.dns_configured);
        assert!(!domain.warming_enabled);
        assert_eq!(domain.warming_status, WarmingStatus::NotEnabled);
        assert_eq!(setup_log.len(), 2);

        let listed = services.domains.list_domains("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn import_duplicate_name_conflicts() {
        let (services, fixtures) = create_test_services();
        fixtures.dns.add_zone("z1", "example.com");

        services
            .domains
            .import_domain("u1", import_request("z1", "example.com"))
            .await
            .unwrap();

        let result = services
            .domains
            .import_domain("u1", import_request("z1", "example.com"))
            .await;
        assert!(matches!(result, Err(CoreError::DomainExists(_))));

        // Still exactly one record
        let listed = services.domains.list_domains("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn import_unknown_zone_fails_without_record() {
        let (services, _fixtures) = create_test_services();

        let result = services
            .domains
            .import_domain("u1", import_request("missing", "example.com"))
            .await;
        assert!(matches!(
            result,
            Err(CoreError::Provider(ProviderError::DomainNotFound { .. }))
        ));

        let listed = services.domains.list_domains("u1").await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn same_name_allowed_across_accounts() {
        let (services, fixtures) = create_test_services();
        fixtures.dns.add_zone("z1", "example.com");

        services
            .domains
            .import_domain("u1", import_request("z1", "example.com"))
            .await
            .unwrap();
        services
            .domains
            .import_domain("u2", import_request("z1", "example.com"))
            .await
            .unwrap();

        assert_eq!(services.domains.list_domains("u1").await.unwrap().len(), 1);
        assert_eq!(services.domains.list_domains("u2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn purchase_creates_zone_then_domain() {
        let (services, fixtures) = create_test_services();

        let (domain, _) = services
            .domains
            .purchase_domain("u1", "bought.io")
            .await
            .unwrap();

        assert!(domain.zone_id.is_some());
        assert!(!domain.dns_configured);
        assert!(fixtures.dns.has_zone_named("bought.io"));
    }

    #[tokio::test]
    async fn delete_domain_removes_record() {
        let (services, fixtures) = create_test_services();
        fixtures.dns.add_zone("z1", "example.com");

        let (domain, _) = services
            .domains
            .import_domain("u1", import_request("z1", "example.com"))
            .await
            .unwrap();

        services.domains.delete_domain("u1", &domain.id).await.unwrap();
        assert!(services.domains.list_domains("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_domain_not_found() {
        let (services, _fixtures) = create_test_services();
        let result = services.domains.delete_domain("u1", "ghost").await;
        assert!(matches!(result, Err(CoreError::DomainNotFound(_))));
    }

    #[tokio::test]
    async fn delete_other_accounts_domain_not_found() {
        let (services, fixtures) = create_test_services();
        fixtures.dns.add_zone("z1", "example.com");

        let (domain, _) = services
            .domains
            .import_domain("u1", import_request("z1", "example.com"))
            .await
            .unwrap();

        let result = services.domains.delete_domain("u2", &domain.id).await;
        assert!(matches!(result, Err(CoreError::DomainNotFound(_))));
    }
}
