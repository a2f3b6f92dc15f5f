//! DNS configuration and email routing steps

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::{require_zone, ServiceContext};
use crate::types::{RecordSpec, RoutingRuleSpec, SetupLogEntry};
use crate::util::is_valid_email;

/// DMARC policy provisioned for every managed domain.
const DMARC_POLICY: &str = "v=DMARC1; p=none;";

/// DNS configuration and email routing service.
///
/// Both steps are idempotent: records and rules are upserted keyed by
/// `(type, name)` / matched address, so client retries after a timeout roll
/// forward instead of duplicating.
pub struct DnsSetupService {
    ctx: Arc<ServiceContext>,
}

impl DnsSetupService {
    /// Create a DNS setup service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Provision the sending record set (SPF/DKIM from the mail provider,
    /// plus DMARC) into the domain's zone and mark it `dns_configured`.
    pub async fn configure_dns(
        &self,
        user_id: &str,
        domain_id: &str,
    ) -> CoreResult<Vec<SetupLogEntry>> {
        let mut domain = self.ctx.require_domain(user_id, domain_id).await?;
        let zone_id = require_zone(&domain)?;

        let mut setup_log = Vec::new();

        // Registering an already-registered domain returns the existing
        // registration, so this is safe on every retry
        let sending = self
            .ctx
            .mailer
            .register_domain(&domain.domain_name)
            .await?;
        setup_log.push(SetupLogEntry::success(
            "sender",
            format!("Registered {} for sending", domain.domain_name),
        ));

        for spec in &sending.required_records {
            self.ctx.dns.ensure_record(&zone_id, spec).await?;
            setup_log.push(SetupLogEntry::success(
                "dns",
                format!("Upserted {} {}", spec.record_type.as_str(), spec.name),
            ));
        }

        let dmarc = Self::dmarc_record(&domain.domain_name);
        self.ctx.dns.ensure_record(&zone_id, &dmarc).await?;
        setup_log.push(SetupLogEntry::success(
            "dns",
            format!("Upserted TXT {}", dmarc.name),
        ));

        if !domain.dns_configured {
            domain.dns_configured = true;
            domain.updated_at = Utc::now();
            self.ctx.domain_repository.update(&domain).await?;
        }
        setup_log.push(SetupLogEntry::success(
            "registry",
            format!("DNS configured for {}", domain.domain_name),
        ));

        Ok(setup_log)
    }

    /// Enable inbound routing on the domain and forward everything to
    /// `forward_to`.
    ///
    /// Ordering is the caller's responsibility: calling this before the DNS
    /// step fails with a precondition error and mutates nothing.
    pub async fn enable_email_routing(
        &self,
        user_id: &str,
        domain_id: &str,
        forward_to: &str,
    ) -> CoreResult<()> {
        let mut domain = self.ctx.require_domain(user_id, domain_id).await?;

        if !domain.dns_configured {
            return Err(CoreError::PreconditionFailed(
                "Configure DNS before enabling email routing".to_string(),
            ));
        }
        if !is_valid_email(forward_to) {
            return Err(CoreError::ValidationError(format!(
                "Invalid forwarding address: {forward_to}"
            )));
        }

        let zone_id = require_zone(&domain)?;

        self.ctx.dns.enable_email_routing(&zone_id).await?;
        self.ctx
            .dns
            .ensure_routing_rule(
                &zone_id,
                &RoutingRuleSpec {
                    address: None,
                    forward_to: forward_to.to_string(),
                },
            )
            .await?;

        domain.email_routing_enabled = true;
        domain.forward_to = Some(forward_to.to_string());
        domain.updated_at = Utc::now();
        self.ctx.domain_repository.update(&domain).await?;

        log::info!(
            "Email routing enabled for {} -> {forward_to}",
            domain.domain_name
        );
        Ok(())
    }

    /// Re-apply the sending record set and re-request verification.
    ///
    /// Bounces are almost always a drifted or deleted SPF/DKIM record; the
    /// upsert converges the zone back to the desired state.
    pub async fn fix_bounces(&self, user_id: &str, domain_id: &str) -> CoreResult<String> {
        let domain = self.ctx.require_domain(user_id, domain_id).await?;

        if !domain.dns_configured {
            return Err(CoreError::PreconditionFailed(
                "Configure DNS before fixing bounces".to_string(),
            ));
        }

        let zone_id = require_zone(&domain)?;
        let sending = self
            .ctx
            .mailer
            .register_domain(&domain.domain_name)
            .await?;

        let mut applied = 0usize;
        for spec in &sending.required_records {
            self.ctx.dns.ensure_record(&zone_id, spec).await?;
            applied += 1;
        }
        self.ctx
            .dns
            .ensure_record(&zone_id, &Self::dmarc_record(&domain.domain_name))
            .await?;
        applied += 1;

        // Verification re-check is best effort; the records are already fixed
        if let Err(e) = self.ctx.mailer.request_verification(&sending.id).await {
            log::warn!(
                "Verification re-request failed for {}: {e}",
                domain.domain_name
            );
        }

        Ok(format!(
            "Re-applied {applied} DNS records for {}; verification re-requested",
            domain.domain_name
        ))
    }

    fn dmarc_record(domain_name: &str) -> RecordSpec {
        RecordSpec::txt(format!("_dmarc.{domain_name}"), DMARC_POLICY)
    }
}
