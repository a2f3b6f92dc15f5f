//! Warming enablement and verification polling

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::{require_zone, ServiceContext};
use crate::types::{Domain, RoutingRuleSpec, WarmingCheck, WarmingStatus};

/// Warming enablement and verification service.
pub struct WarmingService {
    ctx: Arc<ServiceContext>,
}

impl WarmingService {
    /// Create a warming service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Mark a domain eligible for the warming pool.
    ///
    /// Requires `dns_configured`. Provisions the four convention addresses
    /// (forwarding rules when routing is enabled) and moves `warming_status`
    /// to `pending`. Calling again while `pending` or `verified` is a no-op
    /// returning the current record; the client has no disable affordance and
    /// retries on timeout.
    pub async fn enable_warming(&self, user_id: &str, domain_id: &str) -> CoreResult<Domain> {
        let mut domain = self.ctx.require_domain(user_id, domain_id).await?;

        if domain.warming_enabled {
            return Ok(domain);
        }
        if !domain.dns_configured {
            return Err(CoreError::PreconditionFailed(
                "Configure DNS before enabling warming".to_string(),
            ));
        }

        let sending = self
            .ctx
            .mailer
            .register_domain(&domain.domain_name)
            .await?;

        // Inbound side of the warming addresses; outbound needs no
        // provisioning beyond the sending-domain registration
        if domain.email_routing_enabled {
            if let Some(forward_to) = domain.forward_to.clone() {
                let zone_id = require_zone(&domain)?;

                // Rules are keyed by distinct addresses, so they can be
                // upserted concurrently
                let rule_futures: Vec<_> = domain
                    .warming_addresses()
                    .into_iter()
                    .map(|address| {
                        let spec = RoutingRuleSpec {
                            address: Some(address),
                            forward_to: forward_to.clone(),
                        };
                        let zone_id = zone_id.clone();
                        async move { self.ctx.dns.ensure_routing_rule(&zone_id, &spec).await }
                    })
                    .collect();

                for result in futures::future::join_all(rule_futures).await {
                    result?;
                }
            }
        }

        // Kick off propagation checking upstream; best effort
        if let Err(e) = self.ctx.mailer.request_verification(&sending.id).await {
            log::warn!(
                "Verification request failed for {}: {e}",
                domain.domain_name
            );
        }

        domain.warming_enabled = true;
        domain.warming_status = if sending.status.is_verified() {
            WarmingStatus::Verified
        } else {
            WarmingStatus::Pending
        };
        domain.updated_at = Utc::now();
        self.ctx.domain_repository.update(&domain).await?;

        log::info!("Warming enabled for {}", domain.domain_name);
        Ok(domain)
    }

    /// Poll upstream propagation and maybe flip `pending → verified`.
    ///
    /// A read with one possible side-effecting transition. `verified` is
    /// terminal: once reached, the answer comes from our own record and no
    /// sequence of polls (from any number of tabs) can regress it.
    pub async fn check_warming_status(
        &self,
        user_id: &str,
        domain_id: &str,
    ) -> CoreResult<WarmingCheck> {
        let mut domain = self.ctx.require_domain(user_id, domain_id).await?;

        match domain.warming_status {
            WarmingStatus::NotEnabled => Ok(WarmingCheck {
                status: WarmingStatus::NotEnabled,
                verified: false,
            }),
            WarmingStatus::Verified => Ok(WarmingCheck {
                status: WarmingStatus::Verified,
                verified: true,
            }),
            WarmingStatus::Pending => {
                let verified_upstream = self
                    .ctx
                    .mailer
                    .find_domain(&domain.domain_name)
                    .await?
                    .is_some_and(|d| d.status.is_verified());

                if verified_upstream {
                    domain.warming_status = WarmingStatus::Verified;
                    domain.updated_at = Utc::now();
                    self.ctx.domain_repository.update(&domain).await?;
                    log::info!("Warming verified for {}", domain.domain_name);
                }

                Ok(WarmingCheck {
                    status: domain.warming_status,
                    verified: verified_upstream,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_services, import_request};

    async fn configured_domain(
        services: &crate::test_utils::TestServices,
        fixtures: &crate::test_utils::TestFixtures,
    ) -> Domain {
        fixtures.dns.add_zone("z1", "example.com");
        let (domain, _) = services
            .domains
            .import_domain("u1", import_request("z1", "example.com"))
            .await
            .unwrap();
        services
            .dns_setup
            .configure_dns("u1", &domain.id)
            .await
            .unwrap();
        services.ctx.require_domain("u1", &domain.id).await.unwrap()
    }

    #[tokio::test]
    async fn enable_warming_requires_dns() {
        let (services, fixtures) = create_test_services();
        fixtures.dns.add_zone("z1", "example.com");
        let (domain, _) = services
            .domains
            .import_domain("u1", import_request("z1", "example.com"))
            .await
            .unwrap();

        let result = services.warming.enable_warming("u1", &domain.id).await;
        assert!(matches!(result, Err(CoreError::PreconditionFailed(_))));
    }

    #[tokio::test]
    async fn enable_warming_moves_to_pending() {
        let (services, fixtures) = create_test_services();
        let domain = configured_domain(&services, &fixtures).await;

        let enabled = services
            .warming
            .enable_warming("u1", &domain.id)
            .await
            .unwrap();
        assert!(enabled.warming_enabled);
        assert_eq!(enabled.warming_status, WarmingStatus::Pending);
        assert!(fixtures.mailer.verification_requested("example.com"));
    }

    #[tokio::test]
    async fn enable_warming_twice_is_noop() {
        let (services, fixtures) = create_test_services();
        let domain = configured_domain(&services, &fixtures).await;

        services
            .warming
            .enable_warming("u1", &domain.id)
            .await
            .unwrap();
        let first_requests = fixtures.mailer.verification_request_count("example.com");

        let second = services
            .warming
            .enable_warming("u1", &domain.id)
            .await
            .unwrap();
        assert!(second.warming_enabled);
        assert_eq!(second.warming_status, WarmingStatus::Pending);
        // No second round of provisioning side effects
        assert_eq!(
            fixtures.mailer.verification_request_count("example.com"),
            first_requests
        );
    }

    #[tokio::test]
    async fn enable_warming_provisions_address_rules_when_routed() {
        let (services, fixtures) = create_test_services();
        let domain = configured_domain(&services, &fixtures).await;
        services
            .dns_setup
            .enable_email_routing("u1", &domain.id, "me@gmail.com")
            .await
            .unwrap();

        services
            .warming
            .enable_warming("u1", &domain.id)
            .await
            .unwrap();

        let rules = fixtures.dns.routing_rules("z1");
        let addressed: Vec<_> = rules.iter().filter_map(|r| r.address.clone()).collect();
        assert!(addressed.contains(&"team@example.com".to_string()));
        assert!(addressed.contains(&"info@example.com".to_string()));
        assert_eq!(addressed.len(), 4);
    }

    #[tokio::test]
    async fn check_status_pending_until_propagated() {
        let (services, fixtures) = create_test_services();
        let domain = configured_domain(&services, &fixtures).await;
        services
            .warming
            .enable_warming("u1", &domain.id)
            .await
            .unwrap();

        let check = services
            .warming
            .check_warming_status("u1", &domain.id)
            .await
            .unwrap();
        assert_eq!(check.status, WarmingStatus::Pending);
        assert!(!check.verified);

        fixtures.mailer.set_verified("example.com");

        let check = services
            .warming
            .check_warming_status("u1", &domain.id)
            .await
            .unwrap();
        assert_eq!(check.status, WarmingStatus::Verified);
        assert!(check.verified);
    }

    #[tokio::test]
    async fn verification_is_monotonic() {
        let (services, fixtures) = create_test_services();
        let domain = configured_domain(&services, &fixtures).await;
        services
            .warming
            .enable_warming("u1", &domain.id)
            .await
            .unwrap();

        fixtures.mailer.set_verified("example.com");
        services
            .warming
            .check_warming_status("u1", &domain.id)
            .await
            .unwrap();

        // Upstream regresses (propagation blip); our answer must not
        fixtures.mailer.set_unverified("example.com");
        for _ in 0..3 {
            let check = services
                .warming
                .check_warming_status("u1", &domain.id)
                .await
                .unwrap();
            assert_eq!(check.status, WarmingStatus::Verified);
            assert!(check.verified);
        }
    }

    #[tokio::test]
    async fn check_status_not_enabled() {
        let (services, fixtures) = create_test_services();
        let domain = configured_domain(&services, &fixtures).await;

        let check = services
            .warming
            .check_warming_status("u1", &domain.id)
            .await
            .unwrap();
        assert_eq!(check.status, WarmingStatus::NotEnabled);
        assert!(!check.verified);
    }

    #[tokio::test]
    async fn check_status_unknown_domain() {
        let (services, _fixtures) = create_test_services();
        let result = services.warming.check_warming_status("u1", "ghost").await;
        assert!(matches!(result, Err(CoreError::DomainNotFound(_))));
    }
}
